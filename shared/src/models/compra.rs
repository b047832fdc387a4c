//! Compra integrada (storefront checkout) DTOs

use serde::{Deserialize, Serialize};

use super::{LineaFacturaRequest, MetodoPago};

/// Payload for `/compra-integrada/procesar`: creates invoice and order in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompraIntegradaRequest {
    pub cliente_email: String,
    pub items: Vec<LineaFacturaRequest>,
    pub metodo_pago: MetodoPago,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_descuento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion_envio: Option<String>,
    /// Provisional total shown to the customer
    pub total: f64,
}

/// Server answer for an integrated purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompraIntegradaResponse {
    pub numero_factura: String,
    #[serde(default)]
    pub numero_pedido: Option<String>,
    pub total: f64,
    #[serde(default, alias = "mensaje")]
    pub message: Option<String>,
}
