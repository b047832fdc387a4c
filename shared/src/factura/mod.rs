//! Invoice session (point-of-sale cart)
//!
//! Accumulates cart lines, the selected customer, an optional discount and
//! the payment method. Every mutation recomputes the totals from scratch:
//!
//! - `subtotal = Σ cantidad · precio_unitario`
//! - `descuento = porcentaje ? subtotal · v / 100 : min(v, subtotal)`
//! - `iva = (subtotal − descuento) · 0.21`
//! - `total = subtotal − descuento + iva`
//!
//! These totals are a provisional projection for display. The server
//! recomputes them and its invoice is authoritative.

pub mod money;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    Cliente, CompraIntegradaRequest, DescuentoRequest, FacturaRequest, ItemStock,
    LineaFacturaRequest, MetodoPago, Producto,
};
use money::{
    IVA_RATE, require_finite, round_money, to_decimal, to_f64, validate_cart_item, validate_quantity,
};

/// Ephemeral cart line; lives only as long as the checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub producto_id: i64,
    pub descripcion: String,
    pub cantidad: i32,
    pub precio_unitario: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talla: Option<String>,
}

impl CartItem {
    /// Cart line for a product at its sale price
    pub fn desde_producto(producto: &Producto, cantidad: i32) -> Self {
        Self {
            producto_id: producto.id,
            descripcion: producto.descripcion.clone(),
            cantidad,
            precio_unitario: producto.precio_venta,
            color: None,
            talla: None,
        }
    }

    pub fn con_variante(mut self, color: impl Into<String>, talla: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self.talla = Some(talla.into());
        self
    }

    pub fn clave(&self) -> LineaKey {
        LineaKey {
            producto_id: self.producto_id,
            color: self.color.clone(),
            talla: self.talla.clone(),
        }
    }

    pub fn importe(&self) -> f64 {
        to_f64(to_decimal(self.precio_unitario) * Decimal::from(self.cantidad))
    }
}

/// Identity of a cart line: same product and same variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineaKey {
    pub producto_id: i64,
    pub color: Option<String>,
    pub talla: Option<String>,
}

impl LineaKey {
    pub fn producto(producto_id: i64) -> Self {
        Self {
            producto_id,
            color: None,
            talla: None,
        }
    }
}

/// Discount kind supported by the cash register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoDescuento {
    Porcentaje,
    Fijo,
}

impl TipoDescuento {
    fn as_str(&self) -> &'static str {
        match self {
            TipoDescuento::Porcentaje => "porcentaje",
            TipoDescuento::Fijo => "fijo",
        }
    }
}

/// Discount applied to the whole cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descuento {
    pub tipo: TipoDescuento,
    pub valor: f64,
    /// Promotion code, when the discount comes from a campaign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
}

impl Descuento {
    pub fn porcentaje(valor: f64) -> Self {
        Self {
            tipo: TipoDescuento::Porcentaje,
            valor,
            codigo: None,
        }
    }

    pub fn fijo(valor: f64) -> Self {
        Self {
            tipo: TipoDescuento::Fijo,
            valor,
            codigo: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        require_finite(self.valor, "valor del descuento")?;
        if self.valor < 0.0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "El descuento no puede ser negativo",
            ));
        }
        if self.tipo == TipoDescuento::Porcentaje && self.valor > 100.0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "El porcentaje de descuento no puede superar 100",
            ));
        }
        Ok(())
    }
}

fn descuento_decimal(descuento: &Descuento, subtotal: Decimal) -> Decimal {
    let valor = to_decimal(descuento.valor);
    match descuento.tipo {
        TipoDescuento::Porcentaje => subtotal * valor / Decimal::ONE_HUNDRED,
        TipoDescuento::Fijo => valor.min(subtotal),
    }
}

/// Discount amount for a subtotal
///
/// Percentage: `subtotal · v / 100`. Fixed: `min(v, subtotal)`.
pub fn calcular_descuento(descuento: &Descuento, subtotal: f64) -> f64 {
    to_f64(descuento_decimal(descuento, to_decimal(subtotal)))
}

/// Recomputed totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totales {
    pub subtotal: f64,
    pub descuento: f64,
    pub iva: f64,
    pub total: f64,
}

/// Pure totals computation; the single place the cart arithmetic lives
pub fn calcular_totales(items: &[CartItem], descuento: Option<&Descuento>) -> Totales {
    let subtotal: Decimal = items
        .iter()
        .map(|i| to_decimal(i.precio_unitario) * Decimal::from(i.cantidad))
        .sum();
    let subtotal = round_money(subtotal);
    // Each figure is rounded before the next builds on it, so the
    // displayed amounts always add up: total = subtotal - descuento + iva
    let monto_descuento = descuento
        .map(|d| round_money(descuento_decimal(d, subtotal)))
        .unwrap_or(Decimal::ZERO);
    let base = subtotal - monto_descuento;
    let iva = round_money(base * IVA_RATE);
    let total = base + iva;

    Totales {
        subtotal: to_f64(subtotal),
        descuento: to_f64(monto_descuento),
        iva: to_f64(iva),
        total: to_f64(total),
    }
}

/// Point-of-sale invoice session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacturaSession {
    items: Vec<CartItem>,
    cliente: Option<Cliente>,
    descuento: Option<Descuento>,
    metodo_pago: MetodoPago,
    totales: Totales,
}

impl FacturaSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn cliente(&self) -> Option<&Cliente> {
        self.cliente.as_ref()
    }

    pub fn descuento(&self) -> Option<&Descuento> {
        self.descuento.as_ref()
    }

    pub fn metodo_pago(&self) -> MetodoPago {
        self.metodo_pago
    }

    pub fn totales(&self) -> Totales {
        self.totales
    }

    pub fn subtotal(&self) -> f64 {
        self.totales.subtotal
    }

    pub fn descuento_monto(&self) -> f64 {
        self.totales.descuento
    }

    pub fn iva(&self) -> f64 {
        self.totales.iva
    }

    pub fn total(&self) -> f64 {
        self.totales.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines
    pub fn unidades(&self) -> i32 {
        self.items.iter().map(|i| i.cantidad).sum()
    }

    // ========== Mutations ==========

    /// Add a line; an existing line for the same product and variant is merged
    pub fn agregar_item(&mut self, item: CartItem) -> AppResult<()> {
        validate_cart_item(&item)?;
        let key = item.clave();
        if let Some(existing) = self.items.iter_mut().find(|i| i.clave() == key) {
            let cantidad = existing.cantidad.saturating_add(item.cantidad);
            validate_quantity(cantidad)?;
            existing.cantidad = cantidad;
            existing.precio_unitario = item.precio_unitario;
        } else {
            self.items.push(item);
        }
        self.recalcular();
        Ok(())
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn actualizar_cantidad(&mut self, key: &LineaKey, cantidad: i32) -> AppResult<()> {
        if cantidad <= 0 {
            return self.eliminar_item(key);
        }
        validate_quantity(cantidad)?;
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.clave() == key)
            .ok_or_else(|| AppError::new(ErrorCode::CartItemNotFound))?;
        item.cantidad = cantidad;
        self.recalcular();
        Ok(())
    }

    pub fn eliminar_item(&mut self, key: &LineaKey) -> AppResult<()> {
        let before = self.items.len();
        self.items.retain(|i| &i.clave() != key);
        if self.items.len() == before {
            return Err(AppError::new(ErrorCode::CartItemNotFound));
        }
        self.recalcular();
        Ok(())
    }

    pub fn establecer_descuento(&mut self, descuento: Descuento) -> AppResult<()> {
        descuento.validate()?;
        self.descuento = Some(descuento);
        self.recalcular();
        Ok(())
    }

    pub fn quitar_descuento(&mut self) {
        self.descuento = None;
        self.recalcular();
    }

    pub fn establecer_cliente(&mut self, cliente: Option<Cliente>) {
        self.cliente = cliente;
    }

    pub fn establecer_metodo_pago(&mut self, metodo_pago: MetodoPago) {
        self.metodo_pago = metodo_pago;
    }

    /// Reset to an empty session (after a successful checkout)
    pub fn limpiar(&mut self) {
        *self = Self::default();
    }

    /// Recompute all totals from the current lines and discount
    pub fn recalcular(&mut self) {
        self.totales = calcular_totales(&self.items, self.descuento.as_ref());
        tracing::debug!(
            items = self.items.len(),
            subtotal = self.totales.subtotal,
            total = self.totales.total,
            "factura session recalculated"
        );
    }

    // ========== Payload builders ==========

    /// Lines to check against stock before checkout
    pub fn items_stock(&self) -> Vec<ItemStock> {
        self.items
            .iter()
            .map(|i| ItemStock {
                producto_id: i.producto_id,
                cantidad: i.cantidad,
                color: i.color.clone(),
                talla: i.talla.clone(),
            })
            .collect()
    }

    fn lineas_request(&self) -> Vec<LineaFacturaRequest> {
        self.items
            .iter()
            .map(|i| LineaFacturaRequest {
                producto_id: i.producto_id,
                cantidad: i.cantidad,
                precio_unitario: i.precio_unitario,
                color: i.color.clone(),
                talla: i.talla.clone(),
            })
            .collect()
    }

    fn descuento_request(&self) -> Option<DescuentoRequest> {
        self.descuento.as_ref().map(|d| DescuentoRequest {
            tipo: d.tipo.as_str().to_string(),
            valor: d.valor,
            codigo: d.codigo.clone(),
        })
    }

    /// Build the invoice payload for the back-office POS
    pub fn to_request(&self) -> AppResult<FacturaRequest> {
        if self.items.is_empty() {
            return Err(AppError::new(ErrorCode::CartEmpty));
        }
        let cliente = self
            .cliente
            .as_ref()
            .ok_or_else(|| AppError::new(ErrorCode::CustomerRequired))?;

        Ok(FacturaRequest {
            cliente_id: cliente.id,
            items: self.lineas_request(),
            metodo_pago: self.metodo_pago,
            descuento: self.descuento_request(),
            subtotal: self.totales.subtotal,
            iva: self.totales.iva,
            total: self.totales.total,
        })
    }

    /// Build the storefront checkout payload
    pub fn to_compra_request(
        &self,
        cliente_email: &str,
        direccion_envio: Option<String>,
    ) -> AppResult<CompraIntegradaRequest> {
        if self.items.is_empty() {
            return Err(AppError::new(ErrorCode::CartEmpty));
        }
        if cliente_email.trim().is_empty() {
            return Err(AppError::new(ErrorCode::CustomerRequired));
        }
        Ok(CompraIntegradaRequest {
            cliente_email: cliente_email.trim().to_string(),
            items: self.lineas_request(),
            metodo_pago: self.metodo_pago,
            codigo_descuento: self.descuento.as_ref().and_then(|d| d.codigo.clone()),
            direccion_envio,
            total: self.totales.total,
        })
    }
}
