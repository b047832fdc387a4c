//! Sales history service

use shared::models::{ResumenVentas, Venta};

use crate::endpoints::VENTAS;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct VentaService<'a> {
    http: &'a HttpClient,
}

impl<'a> VentaService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn listar(&self) -> ClientResult<Vec<Venta>> {
        self.http
            .get(VENTAS)
            .await
            .map_err(|e| e.or_message("Error al cargar ventas"))
    }

    /// Fetch the list and summarize it
    pub async fn resumen(&self) -> ClientResult<(Vec<Venta>, ResumenVentas)> {
        let ventas = self.listar().await?;
        let resumen = ResumenVentas::desde(&ventas);
        Ok((ventas, resumen))
    }
}
