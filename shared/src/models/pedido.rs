//! Pedido Model
//!
//! Customer orders follow a linear lifecycle:
//! `Pendiente → Confirmado → Preparando → Listo → EnTransito → Entregado`,
//! and may be cancelled from any non-terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LineaFactura;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPedido {
    Pendiente,
    Confirmado,
    Preparando,
    Listo,
    EnTransito,
    Entregado,
    Cancelado,
}

impl EstadoPedido {
    /// The next step in the happy path, if any
    pub fn siguiente(&self) -> Option<EstadoPedido> {
        match self {
            Self::Pendiente => Some(Self::Confirmado),
            Self::Confirmado => Some(Self::Preparando),
            Self::Preparando => Some(Self::Listo),
            Self::Listo => Some(Self::EnTransito),
            Self::EnTransito => Some(Self::Entregado),
            Self::Entregado | Self::Cancelado => None,
        }
    }

    pub fn es_terminal(&self) -> bool {
        matches!(self, Self::Entregado | Self::Cancelado)
    }

    /// Only the next step, or cancellation from a non-terminal state
    pub fn puede_transicionar(&self, nuevo: EstadoPedido) -> bool {
        if self.es_terminal() {
            return false;
        }
        nuevo == Self::Cancelado || self.siguiente() == Some(nuevo)
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::Confirmado => "Confirmado",
            Self::Preparando => "En preparación",
            Self::Listo => "Listo para envío",
            Self::EnTransito => "En camino",
            Self::Entregado => "Entregado",
            Self::Cancelado => "Cancelado",
        }
    }
}

impl fmt::Display for EstadoPedido {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etiqueta())
    }
}

/// Customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    #[serde(alias = "numeroPedido")]
    pub numero: String,
    pub cliente_email: String,
    #[serde(default)]
    pub items: Vec<LineaFactura>,
    pub total: f64,
    pub estado: EstadoPedido,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub direccion_envio: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CambioEstadoPedido {
    pub estado: EstadoPedido,
}
