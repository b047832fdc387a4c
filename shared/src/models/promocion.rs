//! Promocion Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Promotion type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoPromocion {
    /// Percentage off (valor = 10 → 10%)
    Porcentaje,
    /// Fixed amount off
    #[serde(alias = "monto_fijo")]
    Fijo,
    /// Buy two, pay one
    #[serde(alias = "2x1")]
    DosPorUno,
    /// Free-form campaign, priced by the backend
    Especial,
}

/// Promotion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPromocion {
    Activa,
    Inactiva,
    Expirada,
}

/// Marketing promotion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promocion {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub tipo: TipoPromocion,
    pub valor: f64,
    #[serde(default)]
    pub codigo_descuento: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[serde(default)]
    pub uso_maximo: Option<u32>,
    #[serde(default)]
    pub uso_actual: u32,
    pub estado: EstadoPromocion,
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validar_ventana", skip_on_field_errors = false))]
pub struct PromocionCreate {
    #[validate(length(min = 1, max = 100, message = "El nombre es obligatorio"))]
    pub nombre: String,
    pub descripcion: String,
    pub tipo: TipoPromocion,
    #[validate(range(min = 0.0, message = "El valor no puede ser negativo"))]
    pub valor: f64,
    #[validate(length(min = 3, max = 30, message = "El código debe tener entre 3 y 30 caracteres"))]
    pub codigo_descuento: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[validate(range(min = 1, message = "El límite de usos debe ser positivo"))]
    pub uso_maximo: Option<u32>,
    pub estado: EstadoPromocion,
}

fn validar_ventana(p: &PromocionCreate) -> Result<(), ValidationError> {
    if p.fecha_fin < p.fecha_inicio {
        let mut err = ValidationError::new("ventana");
        err.message = Some("La fecha de fin debe ser posterior a la de inicio".into());
        return Err(err);
    }
    if p.tipo == TipoPromocion::Porcentaje && p.valor > 100.0 {
        let mut err = ValidationError::new("porcentaje");
        err.message = Some("El porcentaje no puede superar 100".into());
        return Err(err);
    }
    Ok(())
}

/// Update promotion payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromocionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoPromocion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_descuento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uso_maximo: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoPromocion>,
}

/// Summary counters shown on the marketing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasMarketing {
    pub total: u32,
    pub activas: u32,
    pub inactivas: u32,
    pub expiradas: u32,
    #[serde(default)]
    pub usos_totales: u32,
}

impl EstadisticasMarketing {
    /// Recount from a full list
    pub fn desde(promos: &[Promocion]) -> Self {
        let mut stats = Self::default();
        for p in promos {
            stats.sumar(p.estado);
            stats.usos_totales = stats.usos_totales.saturating_add(p.uso_actual);
        }
        stats
    }

    pub fn sumar(&mut self, estado: EstadoPromocion) {
        self.total = self.total.saturating_add(1);
        let c = self.contador(estado);
        *c = c.saturating_add(1);
    }

    pub fn restar(&mut self, estado: EstadoPromocion) {
        self.total = self.total.saturating_sub(1);
        let c = self.contador(estado);
        *c = c.saturating_sub(1);
    }

    pub fn mover(&mut self, de: EstadoPromocion, a: EstadoPromocion) {
        if de == a {
            return;
        }
        let c = self.contador(de);
        *c = c.saturating_sub(1);
        let c = self.contador(a);
        *c = c.saturating_add(1);
    }

    fn contador(&mut self, estado: EstadoPromocion) -> &mut u32 {
        match estado {
            EstadoPromocion::Activa => &mut self.activas,
            EstadoPromocion::Inactiva => &mut self.inactivas,
            EstadoPromocion::Expirada => &mut self.expiradas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create() -> PromocionCreate {
        PromocionCreate {
            nombre: "Invierno".into(),
            descripcion: "Liquidación".into(),
            tipo: TipoPromocion::Porcentaje,
            valor: 20.0,
            codigo_descuento: Some("INV20".into()),
            fecha_inicio: fecha(2026, 6, 1),
            fecha_fin: fecha(2026, 6, 30),
            uso_maximo: Some(100),
            estado: EstadoPromocion::Activa,
        }
    }

    #[test]
    fn test_valid_promocion_create() {
        assert!(create().validate().is_ok());
    }

    #[test]
    fn test_window_must_not_be_inverted() {
        let mut p = create();
        p.fecha_fin = fecha(2026, 5, 1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let mut p = create();
        p.valor = 150.0;
        assert!(p.validate().is_err());
        p.tipo = TipoPromocion::Fijo;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_tipo_aliases() {
        let t: TipoPromocion = serde_json::from_str("\"2x1\"").unwrap();
        assert_eq!(t, TipoPromocion::DosPorUno);
        let t: TipoPromocion = serde_json::from_str("\"dos_por_uno\"").unwrap();
        assert_eq!(t, TipoPromocion::DosPorUno);
    }

    #[test]
    fn test_stats_counters() {
        let mut stats = EstadisticasMarketing::default();
        stats.sumar(EstadoPromocion::Activa);
        stats.sumar(EstadoPromocion::Inactiva);
        stats.mover(EstadoPromocion::Activa, EstadoPromocion::Inactiva);
        assert_eq!((stats.total, stats.activas, stats.inactivas), (2, 0, 2));
        stats.restar(EstadoPromocion::Inactiva);
        assert_eq!((stats.total, stats.inactivas), (1, 1));
        stats.restar(EstadoPromocion::Expirada);
        stats.restar(EstadoPromocion::Expirada);
        assert_eq!((stats.total, stats.expiradas), (0, 0));
    }

    #[test]
    fn test_stats_counters_saturate_at_max() {
        let mut stats: EstadisticasMarketing = serde_json::from_str(&format!(
            r#"{{"total": {max}, "activas": {max}, "inactivas": 0, "expiradas": 0}}"#,
            max = u32::MAX
        ))
        .unwrap();
        stats.sumar(EstadoPromocion::Activa);
        stats.mover(EstadoPromocion::Inactiva, EstadoPromocion::Activa);
        assert_eq!((stats.total, stats.activas), (u32::MAX, u32::MAX));

        let p = Promocion {
            id: 1,
            nombre: "x".into(),
            descripcion: String::new(),
            tipo: TipoPromocion::Fijo,
            valor: 1.0,
            codigo_descuento: None,
            fecha_inicio: fecha(2026, 1, 1),
            fecha_fin: fecha(2026, 2, 1),
            uso_maximo: None,
            uso_actual: u32::MAX,
            estado: EstadoPromocion::Activa,
        };
        let mut otra = p.clone();
        otra.id = 2;
        let stats = EstadisticasMarketing::desde(&[p, otra]);
        assert_eq!(stats.usos_totales, u32::MAX);
        assert_eq!(stats.total, 2);
    }
}
