//! Tienda Client - back-office and storefront client core
//!
//! Talks to the Tienda REST backend and keeps the client-side state the
//! front-ends need: the signed-in employee or customer, persisted storage,
//! stock checks before checkout and the marketing page's promotion list.

pub mod auth;
pub mod client_auth;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod logger;
pub mod marketing;
pub mod notify;
pub mod services;
pub mod stock;
pub mod storage;

pub use auth::{AuthContext, Navegacion};
pub use client_auth::ClientAuthContext;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use marketing::MarketingStore;
pub use notify::{EmailNotifier, EnvioEmail};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// Re-export shared types for convenience
pub use shared::client::{GoogleUser, LoginResponse};
pub use shared::{ApiResponse, FacturaSession, GuardOutcome};
