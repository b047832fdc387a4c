//! Storefront checkout
//!
//! One call creates both the invoice and the order on the backend.

use shared::FacturaSession;
use shared::models::{CompraIntegradaRequest, CompraIntegradaResponse};

use crate::endpoints::COMPRA_INTEGRADA;
use crate::services::ProductoService;
use crate::stock::validar_stock;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct CompraService<'a> {
    http: &'a HttpClient,
}

impl<'a> CompraService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Check stock, then submit the cart
    pub async fn procesar(
        &self,
        session: &FacturaSession,
        cliente_email: &str,
        direccion_envio: Option<String>,
    ) -> ClientResult<CompraIntegradaResponse> {
        let request = session.to_compra_request(cliente_email, direccion_envio)?;

        validar_stock(&ProductoService::new(self.http), &session.items_stock())
            .await?
            .into_result()?;

        self.enviar(&request).await
    }

    /// Submit without the client-side stock check
    pub async fn enviar(&self, request: &CompraIntegradaRequest) -> ClientResult<CompraIntegradaResponse> {
        let respuesta: CompraIntegradaResponse = self
            .http
            .post(COMPRA_INTEGRADA, request)
            .await
            .map_err(|e| e.or_message("Error al procesar la compra"))?;
        tracing::info!(
            factura = %respuesta.numero_factura,
            pedido = respuesta.numero_pedido.as_deref().unwrap_or("-"),
            total = respuesta.total,
            "compra procesada"
        );
        Ok(respuesta)
    }
}
