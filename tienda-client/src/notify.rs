//! E-mail notifications
//!
//! Delivered through the EmailJS REST API when credentials are configured.
//! Without credentials the message is logged and reported as simulated, so
//! flows such as password reset keep working in development.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::models::EstadoPedido;

use crate::config::{ClientConfig, EmailConfig};
use crate::endpoints::EMAILJS_SEND;
use crate::http::extract_message;
use crate::{ClientError, ClientResult};

/// How a message was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvioEmail {
    Enviado,
    Simulado,
}

/// Messages the system sends
#[derive(Debug, Clone, PartialEq)]
pub enum PlantillaEmail {
    RestablecerPassword { nombre: String, enlace: String },
    EstadoPedido { numero: String, estado: EstadoPedido },
}

impl PlantillaEmail {
    pub fn asunto(&self) -> String {
        match self {
            PlantillaEmail::RestablecerPassword { .. } => "Restablecer contraseña".to_string(),
            PlantillaEmail::EstadoPedido { numero, .. } => format!("Tu pedido {} fue actualizado", numero),
        }
    }

    pub fn mensaje(&self) -> String {
        match self {
            PlantillaEmail::RestablecerPassword { nombre, enlace } => format!(
                "Hola {}, para restablecer tu contraseña ingresá a {}. Si no lo solicitaste, ignorá este correo.",
                nombre, enlace
            ),
            PlantillaEmail::EstadoPedido { numero, estado } => {
                format!("Tu pedido {} ahora está: {}.", numero, estado.etiqueta())
            }
        }
    }

    fn params(&self, destinatario: &str) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("to_email".into(), destinatario.into());
        params.insert("subject".into(), self.asunto().into());
        params.insert("message".into(), self.mensaje().into());
        match self {
            PlantillaEmail::RestablecerPassword { nombre, enlace } => {
                params.insert("to_name".into(), nombre.as_str().into());
                params.insert("reset_link".into(), enlace.as_str().into());
            }
            PlantillaEmail::EstadoPedido { numero, estado } => {
                params.insert("order_number".into(), numero.as_str().into());
                params.insert("order_status".into(), estado.etiqueta().into());
            }
        }
        params
    }
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: Map<String, Value>,
}

/// E-mail sender with simulation fallback
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    client: Client,
    config: Option<EmailConfig>,
    endpoint: String,
}

impl EmailNotifier {
    pub fn new(config: Option<EmailConfig>) -> ClientResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            client,
            config,
            endpoint: EMAILJS_SEND.to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(config.email.clone())
    }

    /// Point at another EmailJS-compatible endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Send a message, or simulate it when unconfigured
    pub async fn enviar(&self, destinatario: &str, plantilla: &PlantillaEmail) -> ClientResult<EnvioEmail> {
        if destinatario.trim().is_empty() {
            return Err(ClientError::Validation("Falta el destinatario del correo".to_string()));
        }

        let Some(config) = &self.config else {
            tracing::info!(
                to = destinatario,
                subject = %plantilla.asunto(),
                body = %plantilla.mensaje(),
                "email simulated (EmailJS not configured)"
            );
            return Ok(EnvioEmail::Simulado);
        };

        let body = EmailJsRequest {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: plantilla.params(destinatario),
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_message(&text).unwrap_or_else(|| text.trim().to_string());
            tracing::error!(status = status.as_u16(), error = %message, "email delivery failed");
            return Err(ClientError::Internal(message).or_message("No se pudo enviar el correo"));
        }

        tracing::info!(to = destinatario, subject = %plantilla.asunto(), "email sent");
        Ok(EnvioEmail::Enviado)
    }

    pub async fn enviar_reset_password(
        &self,
        destinatario: &str,
        nombre: &str,
        enlace: &str,
    ) -> ClientResult<EnvioEmail> {
        let plantilla = PlantillaEmail::RestablecerPassword {
            nombre: nombre.to_string(),
            enlace: enlace.to_string(),
        };
        self.enviar(destinatario, &plantilla).await
    }

    pub async fn notificar_estado_pedido(
        &self,
        destinatario: &str,
        numero: &str,
        estado: EstadoPedido,
    ) -> ClientResult<EnvioEmail> {
        let plantilla = PlantillaEmail::EstadoPedido {
            numero: numero.to_string(),
            estado,
        };
        self.enviar(destinatario, &plantilla).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_simulates() {
        let notifier = EmailNotifier::new(None).unwrap();
        assert!(!notifier.is_configured());
        let envio = notifier
            .notificar_estado_pedido("ana@example.com", "P-1", EstadoPedido::EnTransito)
            .await
            .unwrap();
        assert_eq!(envio, EnvioEmail::Simulado);
    }

    #[tokio::test]
    async fn test_empty_recipient_rejected() {
        let notifier = EmailNotifier::new(None).unwrap();
        let err = notifier
            .enviar_reset_password(" ", "Ana", "http://x/reset")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_template_params() {
        let plantilla = PlantillaEmail::EstadoPedido {
            numero: "P-9".into(),
            estado: EstadoPedido::Entregado,
        };
        let params = plantilla.params("a@b.com");
        assert_eq!(params["to_email"], "a@b.com");
        assert_eq!(params["order_status"], "Entregado");
        assert!(params["message"].as_str().unwrap().contains("P-9"));
    }
}
