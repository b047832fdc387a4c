// tienda-client/tests/auth_flow.rs
// Back-office login, persistence and guards against a mock backend

mod common;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::guard::{LOGIN_PATH, UNAUTHORIZED_PATH};
use shared::models::Rol;
use tempfile::TempDir;
use tienda_client::storage::{KeyValueStoreExt, keys};
use tienda_client::{
    AuthContext, EmailNotifier, EnvioEmail, FileStore, GuardOutcome, KeyValueStore, MemoryStore, Navegacion,
};

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("vendedor"), Some("secreto")) => (
            StatusCode::OK,
            Json(json!({
                "token": "tok-vendedor",
                "user": {"id": 7, "username": "vendedor", "nombre": "Vera", "rol": "VENDEDOR"}
            })),
        ),
        (Some("bloqueado"), _) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"mensaje": "Usuario bloqueado"})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({}))),
    }
}

async fn productos(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != "Bearer tok-vendedor" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Token requerido"})));
    }
    (StatusCode::OK, Json(json!({"success": true, "data": []})))
}

async fn forgot(Json(body): Json<Value>) -> Json<Value> {
    match body["email"].as_str() {
        Some("vera@tienda.com") => Json(json!({"reset_token": "abc123", "nombre": "Vera"})),
        _ => Json(json!({})),
    }
}

fn router() -> Router {
    Router::new()
        .route("/loguin/auth/login", post(login))
        .route("/loguin/auth/forgot-password", post(forgot))
        .route("/api/productos", get(productos))
}

fn context(base_url: &str, store: Arc<dyn KeyValueStore>) -> AuthContext {
    AuthContext::load(store, common::http(base_url), EmailNotifier::new(None).unwrap()).unwrap()
}

#[tokio::test]
async fn test_login_stores_session_and_sends_bearer() {
    let base = common::spawn(router()).await;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut auth = context(&base, store.clone());

    let nav = auth.login("vendedor", "secreto").await.unwrap();
    assert_eq!(nav, Navegacion::Dashboard);
    assert_eq!(nav.path(), "/dashboard");
    assert_eq!(auth.user().unwrap().rol, Rol::Vendedor);

    let token: Option<String> = store.load(keys::AUTH_TOKEN).unwrap();
    assert_eq!(token.as_deref(), Some("tok-vendedor"));

    let productos: Vec<Value> = auth.http().get("/api/productos").await.unwrap();
    assert!(productos.is_empty());
}

#[tokio::test]
async fn test_login_failure_messages() {
    let base = common::spawn(router()).await;
    let mut auth = context(&base, Arc::new(MemoryStore::new()));

    let err = auth.login("bloqueado", "x").await.unwrap_err();
    assert_eq!(err.user_message(), "Usuario bloqueado");

    let err = auth.login("vendedor", "mal").await.unwrap_err();
    assert_eq!(err.user_message(), "Credenciales inválidas");
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_session_survives_restart_and_logout_clears_it() {
    let base = common::spawn(router()).await;
    let dir = TempDir::new().unwrap();

    let mut auth = context(&base, Arc::new(FileStore::new(dir.path())));
    auth.login("vendedor", "secreto").await.unwrap();

    let mut restored = context(&base, Arc::new(FileStore::new(dir.path())));
    assert!(restored.is_authenticated());
    assert_eq!(restored.token(), Some("tok-vendedor"));
    assert!(restored.can_access("/pos"));
    assert!(!restored.can_access("/empleados"));

    let nav = restored.logout().unwrap();
    assert_eq!(nav.path(), LOGIN_PATH);

    let after = context(&base, Arc::new(FileStore::new(dir.path())));
    assert!(!after.is_authenticated());
    assert_eq!(after.guard("/pos"), GuardOutcome::Redirect(LOGIN_PATH));
}

#[tokio::test]
async fn test_guards_for_vendedor() {
    let base = common::spawn(router()).await;
    let mut auth = context(&base, Arc::new(MemoryStore::new()));
    assert_eq!(auth.guard("/pos"), GuardOutcome::Redirect(LOGIN_PATH));

    auth.login("vendedor", "secreto").await.unwrap();
    assert!(auth.guard("/pos").is_allowed());
    assert_eq!(auth.guard("/empleados"), GuardOutcome::Redirect(UNAUTHORIZED_PATH));
    assert!(auth.rutas().iter().any(|r| r.path == "/ventas"));
}

#[tokio::test]
async fn test_partial_stored_session_is_ignored() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.save(keys::AUTH_TOKEN, "huerfano").unwrap();
    let auth = context("http://127.0.0.1:9", store);
    assert!(!auth.is_authenticated());
    assert!(auth.http().token().is_none());
}

#[tokio::test]
async fn test_password_reset_simulated_email() {
    let base = common::spawn(router()).await;
    let auth = context(&base, Arc::new(MemoryStore::new()));

    let envio = auth.solicitar_reset_password("vera@tienda.com").await.unwrap();
    assert_eq!(envio, Some(EnvioEmail::Simulado));

    // No link back: the backend mails it itself
    let envio = auth.solicitar_reset_password("otro@tienda.com").await.unwrap();
    assert_eq!(envio, None);

    assert!(auth.solicitar_reset_password("no-es-email").await.is_err());
}
