//! Shared types for the Tienda back-office and storefront
//!
//! Wire models, the unified API envelope, error codes, the static role
//! permission table, route guards and the invoice-session cart math.
//! Everything here is pure: no I/O, no async.

pub mod client;
pub mod error;
pub mod factura;
pub mod guard;
pub mod models;
pub mod permissions;
pub mod promocion;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use factura::FacturaSession;
pub use guard::GuardOutcome;
pub use models::Rol;
pub use response::ApiResponse;
