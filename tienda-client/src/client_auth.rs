//! Storefront account context
//!
//! Customers sign in with e-mail and password, or with Google. Only the
//! e-mail (`clientEmail`) and the Google profile (`googleUser`) are kept
//! in storage. Without Firebase credentials, Google sign-in is simulated
//! against a fixed list of mock accounts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use shared::client::{ClienteLoginRequest, ClienteLoginResponse, GoogleUser};
use shared::models::{Cliente, ClienteCreate};
use validator::Validate;

use crate::config::FirebaseConfig;
use crate::endpoints::{CLIENTES, CLIENTES_LOGIN, FIREBASE_SIGN_IN_IDP};
use crate::storage::{KeyValueStore, KeyValueStoreExt, keys};
use crate::{ClientError, ClientResult, HttpClient};

/// Accounts available when Google sign-in is simulated: (uid, email, name)
pub const MOCK_GOOGLE_USERS: &[(&str, &str, &str)] = &[
    ("mock-google-1", "cliente.demo@gmail.com", "Cliente Demo"),
    ("mock-google-2", "maria.lopez@gmail.com", "María López"),
    ("mock-google-3", "juan.perez@gmail.com", "Juan Pérez"),
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest {
    post_body: String,
    request_uri: String,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

pub struct ClientAuthContext {
    http: HttpClient,
    store: Arc<dyn KeyValueStore>,
    firebase: Option<FirebaseConfig>,
    email: Option<String>,
    google_user: Option<GoogleUser>,
    cliente: Option<Cliente>,
}

impl std::fmt::Debug for ClientAuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAuthContext")
            .field("email", &self.email)
            .field("google_user", &self.google_user)
            .finish()
    }
}

impl ClientAuthContext {
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        http: HttpClient,
        firebase: Option<FirebaseConfig>,
    ) -> ClientResult<Self> {
        let email: Option<String> = store.load(keys::CLIENT_EMAIL)?;
        let google_user: Option<GoogleUser> = store.load(keys::GOOGLE_USER)?;
        Ok(Self {
            http,
            store,
            firebase,
            email,
            google_user,
            cliente: None,
        })
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn google_user(&self) -> Option<&GoogleUser> {
        self.google_user.as_ref()
    }

    /// Customer record from the last password sign-in or registration
    pub fn cliente(&self) -> Option<&Cliente> {
        self.cliente.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.email.is_some()
    }

    fn recordar_email(&mut self, email: &str) -> ClientResult<()> {
        self.store.save(keys::CLIENT_EMAIL, email)?;
        self.email = Some(email.to_string());
        Ok(())
    }

    pub async fn login_cliente(&mut self, email: &str, password: &str) -> ClientResult<&Cliente> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Ingrese email y contraseña".to_string()));
        }
        let response: ClienteLoginResponse = self
            .http
            .post(
                CLIENTES_LOGIN,
                &ClienteLoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await
            .map_err(|e| e.or_message("Email o contraseña incorrectos"))?;

        self.recordar_email(&response.cliente.email)?;
        tracing::info!(email = %response.cliente.email, "cliente inició sesión");
        Ok(self.cliente.insert(response.cliente))
    }

    /// Register and sign in
    pub async fn registrar_cliente(&mut self, datos: &ClienteCreate) -> ClientResult<&Cliente> {
        datos.validate()?;
        let cliente: Cliente = self
            .http
            .post(CLIENTES, datos)
            .await
            .map_err(|e| e.or_message("Error al registrar la cuenta"))?;
        self.recordar_email(&cliente.email)?;
        tracing::info!(email = %cliente.email, "cliente registrado");
        Ok(self.cliente.insert(cliente))
    }

    /// Sign in with a Google ID token
    ///
    /// Simulated mode takes the token to be the account's e-mail.
    pub async fn login_google(&mut self, id_token: &str) -> ClientResult<&GoogleUser> {
        let user = match &self.firebase {
            Some(firebase) => self.firebase_sign_in(firebase, id_token).await?,
            None => {
                let user = mock_google_user(id_token).ok_or_else(|| ClientError::Api {
                    code: ErrorCode::ExternalAuthFailed,
                    message: "No hay una cuenta de Google de prueba con ese email".to_string(),
                })?;
                tracing::info!(email = %user.email, "login con Google simulado (Firebase no configurado)");
                user
            }
        };

        self.store.save(keys::GOOGLE_USER, &user)?;
        self.recordar_email(&user.email)?;
        tracing::info!(email = %user.email, "cliente inició sesión con Google");
        Ok(self.google_user.insert(user))
    }

    async fn firebase_sign_in(&self, firebase: &FirebaseConfig, id_token: &str) -> ClientResult<GoogleUser> {
        let url = format!("{}?key={}", FIREBASE_SIGN_IN_IDP, firebase.api_key);
        let request = SignInWithIdpRequest {
            post_body: format!("id_token={}&providerId=google.com", id_token),
            request_uri: format!("https://{}.firebaseapp.com", firebase.project_id),
            return_secure_token: true,
        };
        let response: SignInWithIdpResponse = self.http.post(&url, &request).await.map_err(|e| {
            tracing::error!(error = %e, "Firebase sign-in failed");
            match e {
                http @ ClientError::Http(_) => http,
                other => ClientError::Api {
                    code: ErrorCode::ExternalAuthFailed,
                    message: other.backend_message().unwrap_or_default().to_string(),
                }
                .or_message(ErrorCode::ExternalAuthFailed.message()),
            }
        })?;
        Ok(GoogleUser {
            uid: response.local_id,
            display_name: response.display_name.unwrap_or_else(|| response.email.clone()),
            email: response.email,
            photo_url: response.photo_url,
        })
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        if let Some(email) = self.email.take() {
            tracing::info!(email = %email, "cliente cerró sesión");
        }
        self.google_user = None;
        self.cliente = None;
        self.store.remove(keys::CLIENT_EMAIL)?;
        self.store.remove(keys::GOOGLE_USER)?;
        Ok(())
    }
}

/// Mock account for an e-mail, case-insensitive
pub fn mock_google_user(email: &str) -> Option<GoogleUser> {
    let email = email.trim();
    MOCK_GOOGLE_USERS
        .iter()
        .find(|(_, e, _)| e.eq_ignore_ascii_case(email))
        .map(|(uid, e, nombre)| GoogleUser {
            uid: uid.to_string(),
            email: e.to_string(),
            display_name: nombre.to_string(),
            photo_url: None,
        })
}
