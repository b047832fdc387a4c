//! Usuario / Rol Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Back-office role (static RBAC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rol {
    #[serde(alias = "ADMIN", alias = "admin")]
    Admin,
    #[serde(alias = "VENDEDOR", alias = "vendedor")]
    Vendedor,
    #[serde(alias = "INVENTARIO", alias = "inventario")]
    Inventario,
    #[serde(alias = "MARKETING", alias = "marketing")]
    Marketing,
}

impl Rol {
    pub const ALL: [Rol; 4] = [Rol::Admin, Rol::Vendedor, Rol::Inventario, Rol::Marketing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "Admin",
            Rol::Vendedor => "Vendedor",
            Rol::Inventario => "Inventario",
            Rol::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown role names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rol desconocido: {0}")]
pub struct RolDesconocido(pub String);

impl FromStr for Rol {
    type Err = RolDesconocido;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rol::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RolDesconocido(s.to_string()))
    }
}

/// Authenticated back-office user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    #[serde(default, alias = "name", alias = "displayName")]
    pub nombre: String,
    #[serde(alias = "role")]
    pub rol: Rol,
}

/// Navigable section of the back-office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub name: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}
