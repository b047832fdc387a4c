//! Producto Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Color/size variant with its own stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variante {
    pub color: String,
    pub talla: String,
    pub stock: i32,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: i64,
    pub descripcion: String,
    #[serde(default)]
    pub categoria_id: Option<i64>,
    pub stock: i32,
    #[serde(default)]
    pub precio_compra: f64,
    pub precio_venta: f64,
    #[serde(default)]
    pub stock_seguridad: i32,
    #[serde(default)]
    pub imagenes: Vec<String>,
    #[serde(default)]
    pub variantes: Vec<Variante>,
}

impl Producto {
    /// Stock at or below the safety threshold
    pub fn stock_bajo(&self) -> bool {
        self.stock <= self.stock_seguridad
    }

    /// Stock for a given color/size, case-insensitive
    pub fn stock_variante(&self, color: &str, talla: &str) -> Option<i32> {
        self.variantes
            .iter()
            .find(|v| v.color.eq_ignore_ascii_case(color) && v.talla.eq_ignore_ascii_case(talla))
            .map(|v| v.stock)
    }

    /// Stock available for a cart line: the variant's when one is selected
    pub fn stock_disponible(&self, color: Option<&str>, talla: Option<&str>) -> Option<i32> {
        match (color, talla) {
            (Some(c), Some(t)) if !self.variantes.is_empty() => self.stock_variante(c, t),
            _ => Some(self.stock),
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductoCreate {
    #[validate(length(min = 1, max = 200, message = "La descripción es obligatoria"))]
    pub descripcion: String,
    pub categoria_id: Option<i64>,
    #[validate(range(min = 0, message = "El stock no puede ser negativo"))]
    pub stock: i32,
    #[validate(range(min = 0.0, message = "El precio de compra no puede ser negativo"))]
    pub precio_compra: f64,
    #[validate(range(min = 0.0, message = "El precio de venta no puede ser negativo"))]
    pub precio_venta: f64,
    #[validate(range(min = 0, message = "El stock de seguridad no puede ser negativo"))]
    pub stock_seguridad: i32,
    #[serde(default)]
    pub imagenes: Vec<String>,
    #[serde(default)]
    pub variantes: Vec<Variante>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_compra: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_venta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_seguridad: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagenes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variantes: Option<Vec<Variante>>,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: i64,
    pub nombre: String,
}

// =============================================================================
// Stock validation DTOs
// =============================================================================

/// One line to check against stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStock {
    pub producto_id: i64,
    pub cantidad: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talla: Option<String>,
}

/// Batch stock validation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidarStockRequest {
    pub items: Vec<ItemStock>,
}

/// A line whose requested quantity exceeds the reported stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaltanteStock {
    pub producto_id: i64,
    pub descripcion: String,
    pub disponible: i32,
    pub solicitado: i32,
}

impl FaltanteStock {
    pub fn mensaje(&self) -> String {
        format!(
            "Stock insuficiente para {}: disponible {}, solicitado {}",
            self.descripcion, self.disponible, self.solicitado
        )
    }
}

/// Batch stock validation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidarStockResponse {
    pub valido: bool,
    #[serde(default)]
    pub faltantes: Vec<FaltanteStock>,
}
