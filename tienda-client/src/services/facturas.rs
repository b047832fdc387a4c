//! Invoice service

use shared::FacturaSession;
use shared::models::{Factura, FacturaRequest};

use crate::endpoints::{self, FACTURAS, FACTURAS_CLIENTE};
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct FacturaService<'a> {
    http: &'a HttpClient,
}

impl<'a> FacturaService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Issue the invoice for the current POS session
    ///
    /// The returned invoice carries the server's totals, which win over
    /// the session's provisional ones.
    pub async fn crear(&self, session: &FacturaSession) -> ClientResult<Factura> {
        let request = session.to_request()?;
        self.crear_desde(&request).await
    }

    pub async fn crear_desde(&self, request: &FacturaRequest) -> ClientResult<Factura> {
        let factura: Factura = self
            .http
            .post(FACTURAS, request)
            .await
            .map_err(|e| e.or_message("Error al generar la factura"))?;
        tracing::info!(
            numero = %factura.numero,
            total = factura.total,
            provisional = request.total,
            "factura emitida"
        );
        Ok(factura)
    }

    pub async fn obtener(&self, numero: &str) -> ClientResult<Factura> {
        self.http
            .get(&endpoints::recurso(FACTURAS, numero))
            .await
            .map_err(|e| e.or_message("Error al cargar la factura"))
    }

    pub async fn listar(&self) -> ClientResult<Vec<Factura>> {
        self.http
            .get(FACTURAS)
            .await
            .map_err(|e| e.or_message("Error al cargar facturas"))
    }

    pub async fn por_cliente(&self, cliente_id: i64) -> ClientResult<Vec<Factura>> {
        self.http
            .get(&endpoints::recurso(FACTURAS_CLIENTE, cliente_id))
            .await
            .map_err(|e| e.or_message("Error al cargar las facturas del cliente"))
    }
}
