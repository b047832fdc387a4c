//! Back-office authentication context
//!
//! Holds the signed-in employee and their bearer token, mirrors both to
//! storage under `authToken` / `authUser`, and answers permission
//! questions against the static role table. Tokens are used as-is: there
//! is no refresh or expiry handling.

use std::sync::Arc;

use shared::client::{ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse, RegisterRequest};
use shared::guard::{self, DASHBOARD_PATH, GuardOutcome, LOGIN_PATH};
use shared::models::{RouteDescriptor, Usuario};
use shared::permissions;

use crate::endpoints::{AUTH_FORGOT_PASSWORD, AUTH_LOGIN, AUTH_REGISTER};
use crate::notify::{EmailNotifier, EnvioEmail};
use crate::storage::{KeyValueStore, KeyValueStoreExt, keys};
use crate::{ClientError, ClientResult, HttpClient};

/// Where the front-end should go after an auth action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navegacion {
    Dashboard,
    Login,
}

impl Navegacion {
    pub fn path(&self) -> &'static str {
        match self {
            Navegacion::Dashboard => DASHBOARD_PATH,
            Navegacion::Login => LOGIN_PATH,
        }
    }
}

pub struct AuthContext {
    http: HttpClient,
    store: Arc<dyn KeyValueStore>,
    notifier: EmailNotifier,
    user: Option<Usuario>,
    token: Option<String>,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("user", &self.user)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl AuthContext {
    /// Restore a previous session from storage
    ///
    /// A token without a user (or the reverse) is treated as signed out.
    pub fn load(store: Arc<dyn KeyValueStore>, http: HttpClient, notifier: EmailNotifier) -> ClientResult<Self> {
        let token: Option<String> = store.load(keys::AUTH_TOKEN)?;
        let user: Option<Usuario> = store.load(keys::AUTH_USER)?;

        let (token, user) = match (token, user) {
            (Some(t), Some(u)) => (Some(t), Some(u)),
            _ => (None, None),
        };
        let mut http = http;
        http.set_token(token.clone());

        if let Some(u) = &user {
            tracing::info!(username = %u.username, rol = %u.rol, "sesión restaurada");
        }

        Ok(Self {
            http,
            store,
            notifier,
            user,
            token,
        })
    }

    pub fn user(&self) -> Option<&Usuario> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Client carrying the current bearer token
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn notifier(&self) -> &EmailNotifier {
        &self.notifier
    }

    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<Navegacion> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Ingrese usuario y contraseña".to_string()));
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .http
            .post(AUTH_LOGIN, &request)
            .await
            .map_err(|e| e.or_message("Credenciales inválidas"))?;

        self.store.save(keys::AUTH_TOKEN, &response.token)?;
        self.store.save(keys::AUTH_USER, &response.user)?;
        self.http.set_token(Some(response.token.clone()));
        tracing::info!(username = %response.user.username, rol = %response.user.rol, "login");
        self.token = Some(response.token);
        self.user = Some(response.user);

        Ok(Navegacion::Dashboard)
    }

    /// Clear the session in memory and storage
    pub fn logout(&mut self) -> ClientResult<Navegacion> {
        if let Some(u) = self.user.take() {
            tracing::info!(username = %u.username, "logout");
        }
        self.token = None;
        self.http.set_token(None);
        self.store.remove(keys::AUTH_TOKEN)?;
        self.store.remove(keys::AUTH_USER)?;
        Ok(Navegacion::Login)
    }

    /// Whether the current user's role lists `path`
    pub fn can_access(&self, path: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| permissions::can_access(u.rol, path))
    }

    /// Evaluate the route guards for `path`
    pub fn guard(&self, path: &str) -> GuardOutcome {
        guard::guard_path(self.user.as_ref(), path)
    }

    /// Menu sections for the current user
    pub fn rutas(&self) -> &'static [RouteDescriptor] {
        match &self.user {
            Some(u) => permissions::rutas_para(u.rol),
            None => &[],
        }
    }

    /// Create a back-office account
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Usuario> {
        if request.username.trim().len() < 3 {
            return Err(ClientError::Validation(
                "El usuario debe tener al menos 3 caracteres".to_string(),
            ));
        }
        if request.password.len() < 6 {
            return Err(ClientError::Validation(
                "La contraseña debe tener al menos 6 caracteres".to_string(),
            ));
        }
        let usuario: Usuario = self
            .http
            .post(AUTH_REGISTER, request)
            .await
            .map_err(|e| e.or_message("Error al registrar el usuario"))?;
        tracing::info!(username = %usuario.username, rol = %usuario.rol, "usuario registrado");
        Ok(usuario)
    }

    /// Request a password reset and e-mail the link
    ///
    /// Returns `None` when the backend sent no link, meaning it delivers
    /// the e-mail itself.
    pub async fn solicitar_reset_password(&self, email: &str) -> ClientResult<Option<EnvioEmail>> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ClientError::Validation("Ingrese un email válido".to_string()));
        }

        let response: ForgotPasswordResponse = self
            .http
            .post(
                AUTH_FORGOT_PASSWORD,
                &ForgotPasswordRequest {
                    email: email.to_string(),
                },
            )
            .await
            .map_err(|e| e.or_message("Error al solicitar el cambio de contraseña"))?;

        let enlace = match (response.reset_url, response.reset_token) {
            (Some(url), _) => url,
            (None, Some(token)) => format!("{}/reset-password?token={}", self.http.base_url(), token),
            (None, None) => return Ok(None),
        };
        let nombre = response.nombre.unwrap_or_else(|| email.to_string());
        let envio = self.notifier.enviar_reset_password(email, &nombre, &enlace).await?;
        Ok(Some(envio))
    }
}
