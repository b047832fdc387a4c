//! Venta Model

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::MetodoPago;
use crate::factura::money::{to_decimal, to_f64};

/// Sales list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    pub id: i64,
    #[serde(default)]
    pub numero_factura: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub vendedor: Option<String>,
    pub total: f64,
    pub metodo_pago: MetodoPago,
}

/// Sales page summary, computed client-side from the fetched list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumenVentas {
    pub cantidad: usize,
    pub total: f64,
    pub ticket_promedio: f64,
    pub efectivo: f64,
    pub tarjeta: f64,
    pub transferencia: f64,
}

impl ResumenVentas {
    pub fn desde(ventas: &[Venta]) -> Self {
        let mut total = Decimal::ZERO;
        let mut por_metodo = [Decimal::ZERO; 3];
        for v in ventas {
            let monto = to_decimal(v.total);
            total += monto;
            let idx = match v.metodo_pago {
                MetodoPago::Efectivo => 0,
                MetodoPago::Tarjeta => 1,
                MetodoPago::Transferencia => 2,
            };
            por_metodo[idx] += monto;
        }
        let promedio = if ventas.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(ventas.len())
        };
        Self {
            cantidad: ventas.len(),
            total: to_f64(total),
            ticket_promedio: to_f64(promedio),
            efectivo: to_f64(por_metodo[0]),
            tarjeta: to_f64(por_metodo[1]),
            transferencia: to_f64(por_metodo[2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venta(id: i64, total: f64, metodo_pago: MetodoPago) -> Venta {
        Venta {
            id,
            numero_factura: None,
            fecha: None,
            cliente: None,
            vendedor: None,
            total,
            metodo_pago,
        }
    }

    #[test]
    fn test_resumen_ventas() {
        let ventas = vec![
            venta(1, 100.10, MetodoPago::Efectivo),
            venta(2, 200.20, MetodoPago::Tarjeta),
            venta(3, 0.01, MetodoPago::Tarjeta),
        ];
        let r = ResumenVentas::desde(&ventas);
        assert_eq!(r.cantidad, 3);
        assert_eq!(r.total, 300.31);
        assert_eq!(r.tarjeta, 200.21);
        assert_eq!(r.efectivo, 100.10);
        assert_eq!(r.ticket_promedio, 100.10);
    }

    #[test]
    fn test_resumen_vacio() {
        assert_eq!(ResumenVentas::desde(&[]), ResumenVentas::default());
    }
}
