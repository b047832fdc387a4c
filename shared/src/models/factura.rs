//! Factura Model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Cliente;

/// Payment method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetodoPago {
    #[default]
    Efectivo,
    Tarjeta,
    Transferencia,
}

impl fmt::Display for MetodoPago {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetodoPago::Efectivo => "Efectivo",
            MetodoPago::Tarjeta => "Tarjeta",
            MetodoPago::Transferencia => "Transferencia",
        })
    }
}

/// Invoice line as issued by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaFactura {
    pub producto_id: i64,
    #[serde(default)]
    pub descripcion: String,
    pub cantidad: i32,
    pub precio_unitario: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talla: Option<String>,
    #[serde(default)]
    pub subtotal: f64,
}

/// Server-issued invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factura {
    #[serde(alias = "numeroFactura")]
    pub numero: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub cliente: Option<Cliente>,
    #[serde(default)]
    pub items: Vec<LineaFactura>,
    pub subtotal: f64,
    #[serde(default)]
    pub descuento: f64,
    pub iva: f64,
    pub total: f64,
    pub metodo_pago: MetodoPago,
    #[serde(default)]
    pub estado: Option<String>,
}

/// Line of the client-built invoice payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaFacturaRequest {
    pub producto_id: i64,
    pub cantidad: i32,
    pub precio_unitario: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talla: Option<String>,
}

/// Discount as sent to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescuentoRequest {
    pub tipo: String,
    pub valor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
}

/// Invoice creation payload
///
/// Totals are the client's provisional projection; the server recomputes
/// and its answer is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacturaRequest {
    pub cliente_id: i64,
    pub items: Vec<LineaFacturaRequest>,
    pub metodo_pago: MetodoPago,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descuento: Option<DescuentoRequest>,
    pub subtotal: f64,
    pub iva: f64,
    pub total: f64,
}
