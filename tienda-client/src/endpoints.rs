//! Backend endpoint paths

use std::fmt::Display;

use reqwest::Url;

use crate::{ClientError, ClientResult};

// ========== Auth (back-office) ==========
pub const AUTH_LOGIN: &str = "/loguin/auth/login";
pub const AUTH_REGISTER: &str = "/loguin/auth/register";
pub const AUTH_FORGOT_PASSWORD: &str = "/loguin/auth/forgot-password";

// ========== Catalog ==========
pub const PRODUCTOS: &str = "/api/productos";
pub const PRODUCTOS_VALIDAR_STOCK: &str = "/api/productos/validar-stock";
pub const CATEGORIAS: &str = "/api/categorias";

// ========== People ==========
pub const CLIENTES: &str = "/api/clientes";
pub const CLIENTES_LOGIN: &str = "/api/clientes/login";
pub const CLIENTES_EMAIL: &str = "/api/clientes/email";
pub const EMPLEADOS: &str = "/api/empleados";

// ========== Sales ==========
pub const FACTURAS: &str = "/facturas";
pub const FACTURAS_CLIENTE: &str = "/facturas/cliente";
pub const PEDIDOS: &str = "/pedidos";
pub const PEDIDOS_CLIENTE: &str = "/pedidos/cliente";
pub const VENTAS: &str = "/api/ventas";
pub const COMPRA_INTEGRADA: &str = "/compra-integrada/procesar";

// ========== Marketing ==========
pub const PROMOCIONES: &str = "/marketing/promociones";
pub const MARKETING_ESTADISTICAS: &str = "/marketing/estadisticas";

// ========== Third parties ==========
pub const EMAILJS_SEND: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const FIREBASE_SIGN_IN_IDP: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithIdp";

/// `{base}/{id}`
pub fn recurso(base: &str, id: impl Display) -> String {
    format!("{}/{}", base, id)
}

/// `{base}/{valor}` with `valor` percent-encoded as a single path segment
pub fn recurso_texto(base: &str, valor: &str) -> ClientResult<String> {
    let mut url = Url::parse("http://localhost").map_err(|e| ClientError::Internal(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Internal("URL base sin ruta".into()))?
        .clear()
        .extend(base.split('/').filter(|s| !s.is_empty()))
        .push(valor);
    Ok(url.path().to_string())
}

/// `{base}/{id}/{accion}`
pub fn accion(base: &str, id: impl Display, accion: &str) -> String {
    format!("{}/{}/{}", base, id, accion)
}
