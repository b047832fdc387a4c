//! Promotion predicates
//!
//! Client-side search/filter over a fetched promotion list, the derived
//! "expiring soon" / "already expired" lists, and checking a discount code
//! at the register. Everything takes `hoy` explicitly so callers decide
//! the clock.

use chrono::{Days, NaiveDate};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::factura::{Descuento, calcular_descuento};
use crate::models::{EstadoPromocion, Promocion, TipoPromocion};

/// Default look-ahead for the "expiring soon" list
pub const DIAS_POR_VENCER: u64 = 7;

/// Filter state of the marketing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltroPromociones {
    /// Free text over name, description and code
    pub busqueda: String,
    pub estado: Option<EstadoPromocion>,
    pub tipo: Option<TipoPromocion>,
}

impl FiltroPromociones {
    pub fn coincide(&self, promo: &Promocion) -> bool {
        if self.estado.is_some_and(|e| e != promo.estado) {
            return false;
        }
        if self.tipo.is_some_and(|t| t != promo.tipo) {
            return false;
        }
        let q = self.busqueda.trim().to_lowercase();
        q.is_empty()
            || promo.nombre.to_lowercase().contains(&q)
            || promo.descripcion.to_lowercase().contains(&q)
            || promo
                .codigo_descuento
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&q))
    }
}

/// Promotions matching the filter, in input order
pub fn filtrar<'a>(promos: &'a [Promocion], filtro: &FiltroPromociones) -> Vec<&'a Promocion> {
    promos.iter().filter(|p| filtro.coincide(p)).collect()
}

/// Status as of `hoy`: an active promotion past its end date counts as expired
pub fn estado_efectivo(promo: &Promocion, hoy: NaiveDate) -> EstadoPromocion {
    if promo.estado == EstadoPromocion::Activa && promo.fecha_fin < hoy {
        EstadoPromocion::Expirada
    } else {
        promo.estado
    }
}

/// Active promotions ending within `dias` days from `hoy` (inclusive), soonest first
pub fn por_vencer(promos: &[Promocion], hoy: NaiveDate, dias: u64) -> Vec<&Promocion> {
    let limite = hoy.checked_add_days(Days::new(dias)).unwrap_or(NaiveDate::MAX);
    let mut out: Vec<&Promocion> = promos
        .iter()
        .filter(|p| p.estado == EstadoPromocion::Activa)
        .filter(|p| p.fecha_fin >= hoy && p.fecha_fin <= limite)
        .collect();
    out.sort_by_key(|p| p.fecha_fin);
    out
}

/// Promotions whose end date is before `hoy`
pub fn vencidas(promos: &[Promocion], hoy: NaiveDate) -> Vec<&Promocion> {
    promos.iter().filter(|p| p.fecha_fin < hoy).collect()
}

/// Find a promotion by code, case-insensitive
pub fn buscar_por_codigo<'a>(promos: &'a [Promocion], codigo: &str) -> Option<&'a Promocion> {
    let codigo = codigo.trim();
    promos.iter().find(|p| {
        p.codigo_descuento
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(codigo))
    })
}

/// Check a promotion is usable today
pub fn validar_vigencia(promo: &Promocion, hoy: NaiveDate) -> AppResult<()> {
    match estado_efectivo(promo, hoy) {
        EstadoPromocion::Activa => {}
        EstadoPromocion::Inactiva => return Err(AppError::new(ErrorCode::PromotionInactive)),
        EstadoPromocion::Expirada => return Err(AppError::new(ErrorCode::PromotionExpired)),
    }
    if hoy < promo.fecha_inicio {
        return Err(AppError::new(ErrorCode::PromotionNotStarted)
            .with_detail("fecha_inicio", promo.fecha_inicio.to_string()));
    }
    if hoy > promo.fecha_fin {
        return Err(AppError::new(ErrorCode::PromotionExpired)
            .with_detail("fecha_inicio", promo.fecha_inicio.to_string())
            .with_detail("fecha_fin", promo.fecha_fin.to_string()));
    }
    if promo.uso_maximo.is_some_and(|max| promo.uso_actual >= max) {
        return Err(AppError::new(ErrorCode::PromotionUsageExhausted));
    }
    Ok(())
}

/// Cart discount for a promotion
///
/// Only percentage and fixed promotions are computed at the register;
/// 2-for-1 and special campaigns are priced by the backend.
pub fn descuento_para(promo: &Promocion, hoy: NaiveDate) -> AppResult<Descuento> {
    validar_vigencia(promo, hoy)?;
    let mut descuento = match promo.tipo {
        TipoPromocion::Porcentaje => Descuento::porcentaje(promo.valor),
        TipoPromocion::Fijo => Descuento::fijo(promo.valor),
        TipoPromocion::DosPorUno | TipoPromocion::Especial => {
            return Err(AppError::new(ErrorCode::PromotionUnsupported)
                .with_detail("promocion", promo.nombre.clone()));
        }
    };
    descuento.codigo = promo.codigo_descuento.clone();
    Ok(descuento)
}

/// Discount amount a promotion takes off `subtotal` today
pub fn aplicar_codigo(promo: &Promocion, subtotal: f64, hoy: NaiveDate) -> AppResult<f64> {
    let descuento = descuento_para(promo, hoy)?;
    Ok(calcular_descuento(&descuento, subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn promo(id: i64, nombre: &str, fin: NaiveDate, estado: EstadoPromocion) -> Promocion {
        Promocion {
            id,
            nombre: nombre.into(),
            descripcion: format!("Campaña {}", nombre),
            tipo: TipoPromocion::Porcentaje,
            valor: 10.0,
            codigo_descuento: Some(format!("{}10", nombre.to_uppercase())),
            fecha_inicio: fecha(2026, 1, 1),
            fecha_fin: fin,
            uso_maximo: Some(50),
            uso_actual: 0,
            estado,
        }
    }

    fn hoy() -> NaiveDate {
        fecha(2026, 10, 16)
    }

    #[test]
    fn test_filtrar_by_text_estado_tipo() {
        let promos = vec![
            promo(1, "verano", fecha(2026, 12, 31), EstadoPromocion::Activa),
            promo(2, "invierno", fecha(2026, 12, 31), EstadoPromocion::Inactiva),
        ];
        let filtro = FiltroPromociones {
            busqueda: "VERANO".into(),
            ..Default::default()
        };
        assert_eq!(filtrar(&promos, &filtro).len(), 1);

        let filtro = FiltroPromociones {
            estado: Some(EstadoPromocion::Inactiva),
            ..Default::default()
        };
        assert_eq!(filtrar(&promos, &filtro)[0].id, 2);

        let filtro = FiltroPromociones {
            tipo: Some(TipoPromocion::Fijo),
            ..Default::default()
        };
        assert!(filtrar(&promos, &filtro).is_empty());

        // match on code
        let filtro = FiltroPromociones {
            busqueda: "invierno10".into(),
            ..Default::default()
        };
        assert_eq!(filtrar(&promos, &filtro)[0].id, 2);
    }

    #[test]
    fn test_por_vencer_within_seven_days() {
        let promos = vec![
            promo(1, "a", fecha(2026, 10, 23), EstadoPromocion::Activa),
            promo(2, "b", fecha(2026, 10, 24), EstadoPromocion::Activa),
            promo(3, "c", fecha(2026, 10, 16), EstadoPromocion::Activa),
            promo(4, "d", fecha(2026, 10, 15), EstadoPromocion::Activa),
            promo(5, "e", fecha(2026, 10, 20), EstadoPromocion::Inactiva),
        ];
        let ids: Vec<i64> = por_vencer(&promos, hoy(), DIAS_POR_VENCER)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_vencidas_and_estado_efectivo() {
        let promos = vec![
            promo(1, "a", fecha(2026, 10, 15), EstadoPromocion::Activa),
            promo(2, "b", fecha(2026, 10, 16), EstadoPromocion::Activa),
        ];
        let ids: Vec<i64> = vencidas(&promos, hoy()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(estado_efectivo(&promos[0], hoy()), EstadoPromocion::Expirada);
        assert_eq!(estado_efectivo(&promos[1], hoy()), EstadoPromocion::Activa);
    }

    #[test]
    fn test_descuento_para_porcentaje_and_fijo() {
        let mut p = promo(1, "verano", fecha(2026, 12, 31), EstadoPromocion::Activa);
        let d = descuento_para(&p, hoy()).unwrap();
        assert_eq!(d, {
            let mut e = Descuento::porcentaje(10.0);
            e.codigo = Some("VERANO10".into());
            e
        });

        p.tipo = TipoPromocion::Fijo;
        p.valor = 500.0;
        assert_eq!(descuento_para(&p, hoy()).unwrap().valor, 500.0);
    }

    #[test]
    fn test_descuento_para_rejections() {
        let mut p = promo(1, "x", fecha(2026, 12, 31), EstadoPromocion::Activa);
        p.uso_actual = 50;
        assert_eq!(
            descuento_para(&p, hoy()).unwrap_err().code,
            ErrorCode::PromotionUsageExhausted
        );

        let mut p = promo(1, "x", fecha(2026, 12, 31), EstadoPromocion::Inactiva);
        assert_eq!(
            descuento_para(&p, hoy()).unwrap_err().code,
            ErrorCode::PromotionInactive
        );

        p.estado = EstadoPromocion::Activa;
        p.fecha_inicio = fecha(2026, 11, 1);
        let err = descuento_para(&p, hoy()).unwrap_err();
        assert_eq!(err.code, ErrorCode::PromotionNotStarted);
        assert_eq!(err.message, "La promoción todavía no comenzó");

        let p = promo(1, "x", fecha(2026, 10, 15), EstadoPromocion::Activa);
        assert_eq!(
            descuento_para(&p, hoy()).unwrap_err().code,
            ErrorCode::PromotionExpired
        );

        let mut p = promo(1, "x", fecha(2026, 12, 31), EstadoPromocion::Activa);
        p.tipo = TipoPromocion::DosPorUno;
        assert_eq!(
            descuento_para(&p, hoy()).unwrap_err().code,
            ErrorCode::PromotionUnsupported
        );
    }

    #[test]
    fn test_aplicar_codigo_amount() {
        let p = promo(1, "verano", fecha(2026, 12, 31), EstadoPromocion::Activa);
        assert_eq!(aplicar_codigo(&p, 200.0, hoy()).unwrap(), 20.0);
        assert!(aplicar_codigo(&p, 200.0, fecha(2027, 1, 1)).is_err());
    }

    #[test]
    fn test_buscar_por_codigo() {
        let promos = vec![promo(1, "verano", fecha(2026, 12, 31), EstadoPromocion::Activa)];
        assert_eq!(buscar_por_codigo(&promos, " verano10 ").unwrap().id, 1);
        assert!(buscar_por_codigo(&promos, "OTRO").is_none());
    }
}
