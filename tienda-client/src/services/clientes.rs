//! Customer service

use shared::models::{Cliente, ClienteCreate, ClienteUpdate};
use validator::Validate;

use crate::endpoints::{self, CLIENTES, CLIENTES_EMAIL};
use crate::{ClientError, ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct ClienteService<'a> {
    http: &'a HttpClient,
}

impl<'a> ClienteService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn listar(&self) -> ClientResult<Vec<Cliente>> {
        self.http
            .get(CLIENTES)
            .await
            .map_err(|e| e.or_message("Error al cargar clientes"))
    }

    pub async fn obtener(&self, id: i64) -> ClientResult<Cliente> {
        self.http
            .get(&endpoints::recurso(CLIENTES, id))
            .await
            .map_err(|e| e.or_message("Error al cargar el cliente"))
    }

    /// Lookup by e-mail; `None` when the backend has no such customer
    pub async fn por_email(&self, email: &str) -> ClientResult<Option<Cliente>> {
        match self
            .http
            .get(&endpoints::recurso_texto(CLIENTES_EMAIL, email.trim())?)
            .await
        {
            Ok(cliente) => Ok(cliente),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.or_message("Error al buscar el cliente")),
        }
    }

    pub async fn crear(&self, cliente: &ClienteCreate) -> ClientResult<Cliente> {
        cliente.validate()?;
        let creado: Cliente = self
            .http
            .post(CLIENTES, cliente)
            .await
            .map_err(|e| e.or_message("Error al registrar el cliente"))?;
        tracing::info!(id = creado.id, email = %creado.email, "cliente creado");
        Ok(creado)
    }

    pub async fn actualizar(&self, id: i64, cambios: &ClienteUpdate) -> ClientResult<Cliente> {
        let actualizado = self
            .http
            .put(&endpoints::recurso(CLIENTES, id), cambios)
            .await
            .map_err(|e| e.or_message("Error al actualizar el cliente"))?;
        tracing::info!(id, "cliente actualizado");
        Ok(actualizado)
    }

    pub async fn eliminar(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<()>(&endpoints::recurso(CLIENTES, id))
            .await
            .map_err(|e| e.or_message("Error al eliminar el cliente"))?;
        tracing::info!(id, "cliente eliminado");
        Ok(())
    }
}

/// Client-side search over name, surname, e-mail and phone
pub fn buscar<'c>(clientes: &'c [Cliente], busqueda: &str) -> Vec<&'c Cliente> {
    clientes.iter().filter(|c| c.coincide(busqueda)).collect()
}
