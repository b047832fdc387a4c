//! Data models
//!
//! Plain records passed through REST responses. Identifiers are always
//! assigned by the backend; the client never invents them.

pub mod cliente;
pub mod compra;
pub mod empleado;
pub mod factura;
pub mod pedido;
pub mod producto;
pub mod promocion;
pub mod usuario;
pub mod venta;

// Re-exports
pub use cliente::*;
pub use compra::*;
pub use empleado::*;
pub use factura::*;
pub use pedido::*;
pub use producto::*;
pub use promocion::*;
pub use usuario::*;
pub use venta::*;
