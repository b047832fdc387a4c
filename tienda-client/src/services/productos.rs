//! Product catalog service

use async_trait::async_trait;
use shared::models::{Categoria, Producto, ProductoCreate, ProductoUpdate};
use validator::Validate;

use crate::endpoints::{self, CATEGORIAS, PRODUCTOS};
use crate::stock::ProductoLookup;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct ProductoService<'a> {
    http: &'a HttpClient,
}

impl<'a> ProductoService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn listar(&self) -> ClientResult<Vec<Producto>> {
        self.http
            .get(PRODUCTOS)
            .await
            .map_err(|e| e.or_message("Error al cargar productos"))
    }

    pub async fn obtener(&self, id: i64) -> ClientResult<Producto> {
        self.http
            .get(&endpoints::recurso(PRODUCTOS, id))
            .await
            .map_err(|e| e.or_message("Error al cargar el producto"))
    }

    pub async fn crear(&self, producto: &ProductoCreate) -> ClientResult<Producto> {
        producto.validate()?;
        let creado: Producto = self
            .http
            .post(PRODUCTOS, producto)
            .await
            .map_err(|e| e.or_message("Error al crear el producto"))?;
        tracing::info!(id = creado.id, descripcion = %creado.descripcion, "producto creado");
        Ok(creado)
    }

    pub async fn actualizar(&self, id: i64, cambios: &ProductoUpdate) -> ClientResult<Producto> {
        let actualizado = self
            .http
            .put(&endpoints::recurso(PRODUCTOS, id), cambios)
            .await
            .map_err(|e| e.or_message("Error al actualizar el producto"))?;
        tracing::info!(id, "producto actualizado");
        Ok(actualizado)
    }

    pub async fn eliminar(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<()>(&endpoints::recurso(PRODUCTOS, id))
            .await
            .map_err(|e| e.or_message("Error al eliminar el producto"))?;
        tracing::info!(id, "producto eliminado");
        Ok(())
    }

    pub async fn categorias(&self) -> ClientResult<Vec<Categoria>> {
        self.http
            .get(CATEGORIAS)
            .await
            .map_err(|e| e.or_message("Error al cargar categorías"))
    }
}

#[async_trait]
impl ProductoLookup for ProductoService<'_> {
    async fn producto(&self, id: i64) -> ClientResult<Producto> {
        self.obtener(id).await
    }
}

/// Client-side search over description, case-insensitive
pub fn buscar<'p>(productos: &'p [Producto], busqueda: &str) -> Vec<&'p Producto> {
    let q = busqueda.trim().to_lowercase();
    productos
        .iter()
        .filter(|p| q.is_empty() || p.descripcion.to_lowercase().contains(&q))
        .collect()
}

/// Products at or below their safety stock
pub fn stock_bajo(productos: &[Producto]) -> Vec<&Producto> {
    productos.iter().filter(|p| p.stock_bajo()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(id: i64, descripcion: &str, stock: i32) -> Producto {
        Producto {
            id,
            descripcion: descripcion.into(),
            categoria_id: None,
            stock,
            precio_compra: 0.0,
            precio_venta: 100.0,
            stock_seguridad: 3,
            imagenes: vec![],
            variantes: vec![],
        }
    }

    #[test]
    fn test_buscar_and_stock_bajo() {
        let productos = vec![producto(1, "Remera Lisa", 10), producto(2, "Jean Recto", 2)];
        assert_eq!(buscar(&productos, "remera")[0].id, 1);
        assert_eq!(buscar(&productos, "").len(), 2);
        assert_eq!(stock_bajo(&productos)[0].id, 2);
    }
}
