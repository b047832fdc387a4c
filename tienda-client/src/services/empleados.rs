//! Employee service (admin only)

use shared::models::{Empleado, EmpleadoCreate, EmpleadoUpdate};
use validator::Validate;

use crate::endpoints::{self, EMPLEADOS};
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct EmpleadoService<'a> {
    http: &'a HttpClient,
}

impl<'a> EmpleadoService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn listar(&self) -> ClientResult<Vec<Empleado>> {
        self.http
            .get(EMPLEADOS)
            .await
            .map_err(|e| e.or_message("Error al cargar empleados"))
    }

    pub async fn crear(&self, empleado: &EmpleadoCreate) -> ClientResult<Empleado> {
        empleado.validate()?;
        let creado: Empleado = self
            .http
            .post(EMPLEADOS, empleado)
            .await
            .map_err(|e| e.or_message("Error al crear el empleado"))?;
        tracing::info!(id = creado.id, username = %creado.username, rol = %creado.rol, "empleado creado");
        Ok(creado)
    }

    pub async fn actualizar(&self, id: i64, cambios: &EmpleadoUpdate) -> ClientResult<Empleado> {
        let actualizado = self
            .http
            .put(&endpoints::recurso(EMPLEADOS, id), cambios)
            .await
            .map_err(|e| e.or_message("Error al actualizar el empleado"))?;
        tracing::info!(id, "empleado actualizado");
        Ok(actualizado)
    }

    pub async fn eliminar(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<()>(&endpoints::recurso(EMPLEADOS, id))
            .await
            .map_err(|e| e.or_message("Error al eliminar el empleado"))?;
        tracing::info!(id, "empleado eliminado");
        Ok(())
    }
}
