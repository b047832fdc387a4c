//! Marketing promotions service
//!
//! Listing and statistics degrade to a built-in demo data set when the
//! backend is unavailable, so the marketing page always has something to
//! show. Mutations never fall back.

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use shared::models::{
    EstadisticasMarketing, EstadoPromocion, Promocion, PromocionCreate, PromocionUpdate,
    TipoPromocion,
};
use validator::Validate;

use crate::endpoints::{self, MARKETING_ESTADISTICAS, PROMOCIONES};
use crate::{ClientResult, HttpClient};

#[derive(Serialize)]
struct CambioEstado {
    estado: EstadoPromocion,
}

#[derive(Debug, Clone, Copy)]
pub struct MarketingService<'a> {
    http: &'a HttpClient,
}

impl<'a> MarketingService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Promotions from the backend, without fallback
    pub async fn listar_estricto(&self) -> ClientResult<Vec<Promocion>> {
        self.http
            .get(PROMOCIONES)
            .await
            .map_err(|e| e.or_message("Error al cargar promociones"))
    }

    /// Promotions, or demo data when the backend fails
    pub async fn listar(&self) -> Vec<Promocion> {
        match self.listar_estricto().await {
            Ok(promos) => promos,
            Err(e) => {
                tracing::warn!(error = %e, "promociones no disponibles, usando datos de ejemplo");
                promociones_demo(Local::now().date_naive())
            }
        }
    }

    pub async fn estadisticas_estricto(&self) -> ClientResult<EstadisticasMarketing> {
        self.http
            .get(MARKETING_ESTADISTICAS)
            .await
            .map_err(|e| e.or_message("Error al cargar estadísticas"))
    }

    /// Statistics, or the demo set's statistics when the backend fails
    pub async fn estadisticas(&self) -> EstadisticasMarketing {
        match self.estadisticas_estricto().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "estadísticas no disponibles, usando datos de ejemplo");
                EstadisticasMarketing::desde(&promociones_demo(Local::now().date_naive()))
            }
        }
    }

    pub async fn obtener(&self, id: i64) -> ClientResult<Promocion> {
        self.http
            .get(&endpoints::recurso(PROMOCIONES, id))
            .await
            .map_err(|e| e.or_message("Error al cargar la promoción"))
    }

    pub async fn crear(&self, promocion: &PromocionCreate) -> ClientResult<Promocion> {
        promocion.validate()?;
        let creada: Promocion = self
            .http
            .post(PROMOCIONES, promocion)
            .await
            .map_err(|e| e.or_message("Error al crear la promoción"))?;
        tracing::info!(id = creada.id, nombre = %creada.nombre, "promoción creada");
        Ok(creada)
    }

    pub async fn actualizar(&self, id: i64, cambios: &PromocionUpdate) -> ClientResult<Promocion> {
        let actualizada = self
            .http
            .put(&endpoints::recurso(PROMOCIONES, id), cambios)
            .await
            .map_err(|e| e.or_message("Error al actualizar la promoción"))?;
        tracing::info!(id, "promoción actualizada");
        Ok(actualizada)
    }

    pub async fn eliminar(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<()>(&endpoints::recurso(PROMOCIONES, id))
            .await
            .map_err(|e| e.or_message("Error al eliminar la promoción"))?;
        tracing::info!(id, "promoción eliminada");
        Ok(())
    }

    pub async fn cambiar_estado(&self, id: i64, estado: EstadoPromocion) -> ClientResult<Promocion> {
        let actualizada = self
            .http
            .patch(
                &endpoints::accion(PROMOCIONES, id, "estado"),
                &CambioEstado { estado },
            )
            .await
            .map_err(|e| e.or_message("Error al cambiar el estado de la promoción"))?;
        tracing::info!(id, ?estado, "estado de promoción cambiado");
        Ok(actualizada)
    }
}

fn dias(hoy: NaiveDate, n: i64) -> NaiveDate {
    let delta = Days::new(n.unsigned_abs());
    let fecha = if n >= 0 {
        hoy.checked_add_days(delta)
    } else {
        hoy.checked_sub_days(delta)
    };
    fecha.unwrap_or(hoy)
}

/// Example promotions around `hoy`
pub fn promociones_demo(hoy: NaiveDate) -> Vec<Promocion> {
    vec![
        Promocion {
            id: 1,
            nombre: "Liquidación de temporada".into(),
            descripcion: "20% en toda la colección anterior".into(),
            tipo: TipoPromocion::Porcentaje,
            valor: 20.0,
            codigo_descuento: Some("TEMPORADA20".into()),
            fecha_inicio: dias(hoy, -10),
            fecha_fin: dias(hoy, 20),
            uso_maximo: Some(200),
            uso_actual: 45,
            estado: EstadoPromocion::Activa,
        },
        Promocion {
            id: 2,
            nombre: "Bienvenida".into(),
            descripcion: "Descuento fijo en la primera compra".into(),
            tipo: TipoPromocion::Fijo,
            valor: 5000.0,
            codigo_descuento: Some("BIENVENIDA".into()),
            fecha_inicio: dias(hoy, -30),
            fecha_fin: dias(hoy, 5),
            uso_maximo: None,
            uso_actual: 12,
            estado: EstadoPromocion::Activa,
        },
        Promocion {
            id: 3,
            nombre: "2x1 en remeras".into(),
            descripcion: "Llevá dos remeras y pagá una".into(),
            tipo: TipoPromocion::DosPorUno,
            valor: 0.0,
            codigo_descuento: None,
            fecha_inicio: dias(hoy, 15),
            fecha_fin: dias(hoy, 45),
            uso_maximo: Some(100),
            uso_actual: 0,
            estado: EstadoPromocion::Inactiva,
        },
        Promocion {
            id: 4,
            nombre: "Black Friday".into(),
            descripcion: "Campaña especial de fin de año".into(),
            tipo: TipoPromocion::Especial,
            valor: 0.0,
            codigo_descuento: Some("BLACK".into()),
            fecha_inicio: dias(hoy, -60),
            fecha_fin: dias(hoy, -30),
            uso_maximo: Some(500),
            uso_actual: 500,
            estado: EstadoPromocion::Expirada,
        },
    ]
}
