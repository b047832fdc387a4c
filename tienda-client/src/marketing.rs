//! Marketing page state
//!
//! Holds the fetched promotions and statistics. After a successful
//! mutation the local list and the counters are adjusted in place rather
//! than re-fetched, so they may drift from the server until the next
//! [`MarketingStore::cargar`].

use chrono::NaiveDate;
use shared::factura::Descuento;
use shared::models::{EstadisticasMarketing, EstadoPromocion, Promocion, PromocionCreate, PromocionUpdate};
use shared::promocion::{self, FiltroPromociones};
use shared::{AppError, ErrorCode};

use crate::ClientResult;
use crate::services::MarketingService;

#[derive(Debug, Clone, Default)]
pub struct MarketingStore {
    promociones: Vec<Promocion>,
    estadisticas: EstadisticasMarketing,
    filtro: FiltroPromociones,
}

impl MarketingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch promotions and statistics together
    pub async fn cargar(&mut self, service: &MarketingService<'_>) {
        let (promociones, estadisticas) = futures::join!(service.listar(), service.estadisticas());
        tracing::debug!(promociones = promociones.len(), "marketing cargado");
        self.promociones = promociones;
        self.estadisticas = estadisticas;
    }

    pub fn promociones(&self) -> &[Promocion] {
        &self.promociones
    }

    pub fn estadisticas(&self) -> &EstadisticasMarketing {
        &self.estadisticas
    }

    pub fn filtro(&self) -> &FiltroPromociones {
        &self.filtro
    }

    pub fn establecer_filtro(&mut self, filtro: FiltroPromociones) {
        self.filtro = filtro;
    }

    /// Promotions passing the current filter
    pub fn visibles(&self) -> Vec<&Promocion> {
        promocion::filtrar(&self.promociones, &self.filtro)
    }

    pub fn por_vencer(&self, hoy: NaiveDate) -> Vec<&Promocion> {
        promocion::por_vencer(&self.promociones, hoy, promocion::DIAS_POR_VENCER)
    }

    pub fn vencidas(&self, hoy: NaiveDate) -> Vec<&Promocion> {
        promocion::vencidas(&self.promociones, hoy)
    }

    /// Cart discount for a code typed at the register
    pub fn descuento_por_codigo(&self, codigo: &str, hoy: NaiveDate) -> ClientResult<Descuento> {
        let promo = promocion::buscar_por_codigo(&self.promociones, codigo)
            .ok_or_else(|| AppError::new(ErrorCode::PromotionNotFound).with_detail("codigo", codigo))?;
        Ok(promocion::descuento_para(promo, hoy)?)
    }

    fn posicion(&self, id: i64) -> ClientResult<usize> {
        self.promociones
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::PromotionNotFound).with_detail("id", id).into())
    }

    pub async fn crear(&mut self, service: &MarketingService<'_>, datos: &PromocionCreate) -> ClientResult<&Promocion> {
        let creada = service.crear(datos).await?;
        self.estadisticas.sumar(creada.estado);
        self.promociones.push(creada);
        let last = self.promociones.len() - 1;
        Ok(&self.promociones[last])
    }

    pub async fn actualizar(
        &mut self,
        service: &MarketingService<'_>,
        id: i64,
        cambios: &PromocionUpdate,
    ) -> ClientResult<&Promocion> {
        let idx = self.posicion(id)?;
        let actualizada = service.actualizar(id, cambios).await?;
        self.estadisticas.mover(self.promociones[idx].estado, actualizada.estado);
        self.promociones[idx] = actualizada;
        Ok(&self.promociones[idx])
    }

    pub async fn eliminar(&mut self, service: &MarketingService<'_>, id: i64) -> ClientResult<()> {
        let idx = self.posicion(id)?;
        service.eliminar(id).await?;
        let eliminada = self.promociones.remove(idx);
        self.estadisticas.restar(eliminada.estado);
        Ok(())
    }

    /// Toggle between active and inactive; expired promotions stay put
    pub async fn alternar_estado(&mut self, service: &MarketingService<'_>, id: i64) -> ClientResult<&Promocion> {
        let idx = self.posicion(id)?;
        let actual = self.promociones[idx].estado;
        let nuevo = match actual {
            EstadoPromocion::Activa => EstadoPromocion::Inactiva,
            EstadoPromocion::Inactiva => EstadoPromocion::Activa,
            EstadoPromocion::Expirada => return Err(AppError::new(ErrorCode::PromotionExpired).into()),
        };
        let actualizada = service.cambiar_estado(id, nuevo).await?;
        if actualizada.estado != nuevo {
            tracing::warn!(id, solicitado = ?nuevo, recibido = ?actualizada.estado, "el servidor devolvió otro estado");
        }
        self.estadisticas.mover(actual, actualizada.estado);
        self.promociones[idx] = actualizada;
        Ok(&self.promociones[idx])
    }
}
