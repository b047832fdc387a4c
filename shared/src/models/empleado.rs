//! Empleado Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Rol;

/// Employee response (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empleado {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nombre: String,
    pub rol: Rol,
    #[serde(default = "default_activo")]
    pub activo: bool,
}

fn default_activo() -> bool {
    true
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmpleadoCreate {
    #[validate(length(min = 3, max = 50, message = "El usuario debe tener entre 3 y 50 caracteres"))]
    pub username: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,
    pub rol: Rol,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmpleadoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol: Option<Rol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}
