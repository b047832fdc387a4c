//! Order service

use shared::models::{CambioEstadoPedido, EstadoPedido, Pedido};
use shared::{AppError, ErrorCode};

use crate::endpoints::{self, PEDIDOS, PEDIDOS_CLIENTE};
use crate::notify::EmailNotifier;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct PedidoService<'a> {
    http: &'a HttpClient,
    notifier: Option<&'a EmailNotifier>,
}

impl<'a> PedidoService<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http, notifier: None }
    }

    /// Notify customers by e-mail on status changes
    pub fn with_notifier(mut self, notifier: &'a EmailNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub async fn listar(&self) -> ClientResult<Vec<Pedido>> {
        self.http
            .get(PEDIDOS)
            .await
            .map_err(|e| e.or_message("Error al cargar pedidos"))
    }

    pub async fn por_cliente(&self, email: &str) -> ClientResult<Vec<Pedido>> {
        self.http
            .get(&endpoints::recurso_texto(PEDIDOS_CLIENTE, email.trim())?)
            .await
            .map_err(|e| e.or_message("Error al cargar tus pedidos"))
    }

    pub async fn obtener(&self, numero: &str) -> ClientResult<Pedido> {
        self.http
            .get(&endpoints::recurso(PEDIDOS, numero))
            .await
            .map_err(|e| e.or_message("Error al cargar el pedido"))
    }

    /// Move an order along its lifecycle
    ///
    /// Rejected locally when the transition is not allowed; the customer
    /// e-mail is best effort and never fails the update.
    pub async fn actualizar_estado(&self, pedido: &Pedido, nuevo: EstadoPedido) -> ClientResult<Pedido> {
        if !pedido.estado.puede_transicionar(nuevo) {
            return Err(AppError::with_message(
                ErrorCode::OrderInvalidTransition,
                format!(
                    "No se puede pasar de {} a {}",
                    pedido.estado.etiqueta(),
                    nuevo.etiqueta()
                ),
            )
            .into());
        }

        let actualizado: Pedido = self
            .http
            .put(
                &endpoints::accion(PEDIDOS, &pedido.numero, "estado"),
                &CambioEstadoPedido { estado: nuevo },
            )
            .await
            .map_err(|e| e.or_message("Error al actualizar el estado del pedido"))?;
        tracing::info!(numero = %pedido.numero, de = %pedido.estado, a = %nuevo, "estado de pedido actualizado");

        if let Some(notifier) = self.notifier
            && let Err(e) = notifier
                .notificar_estado_pedido(&actualizado.cliente_email, &actualizado.numero, actualizado.estado)
                .await
        {
            tracing::warn!(numero = %actualizado.numero, error = %e, "no se pudo notificar al cliente");
        }

        Ok(actualizado)
    }
}
