//! Cliente Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer record, used by both the admin panel and storefront accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl Cliente {
    pub fn nombre_completo(&self) -> String {
        if self.apellido.is_empty() {
            self.nombre.clone()
        } else {
            format!("{} {}", self.nombre, self.apellido)
        }
    }

    /// Case-insensitive match over name, surname, e-mail and phone
    pub fn coincide(&self, busqueda: &str) -> bool {
        let q = busqueda.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.nombre.to_lowercase().contains(&q)
            || self.apellido.to_lowercase().contains(&q)
            || self.email.to_lowercase().contains(&q)
            || self.telefono.as_deref().is_some_and(|t| t.contains(&q))
    }
}

/// Create customer payload (admin form and storefront sign-up)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClienteCreate {
    #[validate(length(min = 1, max = 100, message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[validate(length(max = 100))]
    pub apellido: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, max = 20, message = "Teléfono inválido"))]
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    /// Only sent by storefront sign-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: Option<String>,
}

/// Update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClienteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cliente() -> Cliente {
        Cliente {
            id: 1,
            nombre: "Lucía".into(),
            apellido: "Gómez".into(),
            email: "lucia@example.com".into(),
            telefono: Some("1155550000".into()),
            direccion: None,
        }
    }

    #[test]
    fn test_nombre_completo() {
        assert_eq!(cliente().nombre_completo(), "Lucía Gómez");
        let mut c = cliente();
        c.apellido.clear();
        assert_eq!(c.nombre_completo(), "Lucía");
    }

    #[test]
    fn test_coincide() {
        let c = cliente();
        assert!(c.coincide("gómez"));
        assert!(c.coincide("EXAMPLE"));
        assert!(c.coincide("5555"));
        assert!(c.coincide("  "));
        assert!(!c.coincide("pérez"));
    }

    #[test]
    fn test_cliente_create_rejects_bad_email() {
        let payload = ClienteCreate {
            nombre: "Ana".into(),
            apellido: String::new(),
            email: "no-es-email".into(),
            telefono: None,
            direccion: None,
            password: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_cliente_create_short_password() {
        let payload = ClienteCreate {
            nombre: "Ana".into(),
            apellido: String::new(),
            email: "ana@example.com".into(),
            telefono: None,
            direccion: None,
            password: Some("123".into()),
        };
        assert!(payload.validate().is_err());
    }
}
