//! Stock validation before checkout
//!
//! Advisory only: stock can change between this check and the purchase,
//! and the backend has the final word.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;
use shared::models::{FaltanteStock, ItemStock, Producto, ValidarStockRequest, ValidarStockResponse};
use shared::{AppError, ErrorCode};

use crate::endpoints::PRODUCTOS_VALIDAR_STOCK;
use crate::{ClientError, ClientResult, HttpClient};

/// Fetches the current product record for a cart line
#[async_trait]
pub trait ProductoLookup: Send + Sync {
    async fn producto(&self, id: i64) -> ClientResult<Producto>;
}

/// Outcome of a stock check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidacionStock {
    pub faltantes: Vec<FaltanteStock>,
}

impl ValidacionStock {
    pub fn es_valida(&self) -> bool {
        self.faltantes.is_empty()
    }

    /// One human-readable line per shortfall
    pub fn mensajes(&self) -> Vec<String> {
        self.faltantes.iter().map(FaltanteStock::mensaje).collect()
    }

    /// `Ok` when everything is available, otherwise an out-of-stock error
    pub fn into_result(self) -> ClientResult<()> {
        if self.es_valida() {
            return Ok(());
        }
        let mut err = AppError::with_message(ErrorCode::ProductOutOfStock, self.mensajes().join("\n"));
        for f in &self.faltantes {
            err = err.with_detail(f.producto_id.to_string(), f.disponible);
        }
        Err(err.into())
    }
}

/// Stock pool a cart line draws on: the variant's own stock when the
/// product has variants and one is selected, the product stock otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Reserva {
    producto_id: i64,
    variante: Option<(String, String)>,
}

impl Reserva {
    fn de(item: &ItemStock, producto: Option<&Producto>) -> Self {
        let variante = match (producto, &item.color, &item.talla) {
            (Some(p), Some(color), Some(talla)) if !p.variantes.is_empty() => {
                Some((color.to_lowercase(), talla.to_lowercase()))
            }
            _ => None,
        };
        Self {
            producto_id: item.producto_id,
            variante,
        }
    }
}

fn faltante(item: &ItemStock, solicitado: i32, producto: Option<&Producto>) -> Option<FaltanteStock> {
    let disponible = producto
        .and_then(|p| p.stock_disponible(item.color.as_deref(), item.talla.as_deref()))
        .unwrap_or(0);
    if disponible >= solicitado {
        return None;
    }
    let descripcion = match (producto, &item.color, &item.talla) {
        (Some(p), Some(color), Some(talla)) if !p.variantes.is_empty() => {
            format!("{} ({} / {})", p.descripcion, color, talla)
        }
        (Some(p), _, _) => p.descripcion.clone(),
        (None, _, _) => format!("producto #{}", item.producto_id),
    };
    Some(FaltanteStock {
        producto_id: item.producto_id,
        descripcion,
        disponible,
        solicitado,
    })
}

/// One product lookup per distinct product, concurrently
///
/// Lines drawing on the same stock are checked against their summed
/// quantity. A product the backend no longer knows counts as zero stock;
/// any other lookup failure aborts the check.
pub async fn validar_stock<L: ProductoLookup + ?Sized>(lookup: &L, items: &[ItemStock]) -> ClientResult<ValidacionStock> {
    let mut ids: Vec<i64> = items.iter().map(|i| i.producto_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let resultados = join_all(ids.iter().map(|id| lookup.producto(*id))).await;

    let mut productos: HashMap<i64, Producto> = HashMap::new();
    for (id, resultado) in ids.iter().zip(resultados) {
        match resultado {
            Ok(p) => {
                productos.insert(*id, p);
            }
            Err(ClientError::NotFound(_)) => {}
            Err(ClientError::Api { code, .. }) if code == ErrorCode::ProductNotFound => {}
            Err(e) => return Err(e.or_message("Error al validar el stock")),
        }
    }

    // First line of each pool, in cart order, with the pool's total demand
    let mut reservas: Vec<(Reserva, &ItemStock, i32)> = Vec::new();
    for item in items {
        let reserva = Reserva::de(item, productos.get(&item.producto_id));
        match reservas.iter_mut().find(|(r, _, _)| *r == reserva) {
            Some((_, _, total)) => *total = total.saturating_add(item.cantidad),
            None => reservas.push((reserva, item, item.cantidad)),
        }
    }

    let faltantes: Vec<FaltanteStock> = reservas
        .iter()
        .filter_map(|(_, item, total)| faltante(item, *total, productos.get(&item.producto_id)))
        .collect();

    if !faltantes.is_empty() {
        tracing::warn!(faltantes = faltantes.len(), "stock insuficiente");
    }
    Ok(ValidacionStock { faltantes })
}

/// Same check through the backend's batch endpoint
pub async fn validar_stock_lote(http: &HttpClient, items: &[ItemStock]) -> ClientResult<ValidacionStock> {
    let request = ValidarStockRequest { items: items.to_vec() };
    let respuesta: ValidarStockResponse = http
        .post(PRODUCTOS_VALIDAR_STOCK, &request)
        .await
        .map_err(|e| e.or_message("Error al validar el stock"))?;
    if !respuesta.valido && respuesta.faltantes.is_empty() {
        return Err(ClientError::InvalidResponse(
            "stock inválido sin detalle de faltantes".to_string(),
        ));
    }
    Ok(ValidacionStock {
        faltantes: respuesta.faltantes,
    })
}
