//! Per-domain REST services
//!
//! Thin typed wrappers over [`HttpClient`](crate::HttpClient). Each failing
//! call keeps the backend message when there is one and otherwise carries
//! an operation-specific fallback suitable for a banner.

pub mod clientes;
pub mod compra;
pub mod empleados;
pub mod facturas;
pub mod marketing;
pub mod pedidos;
pub mod productos;
pub mod ventas;

pub use clientes::ClienteService;
pub use compra::CompraService;
pub use empleados::EmpleadoService;
pub use facturas::FacturaService;
pub use marketing::MarketingService;
pub use pedidos::PedidoService;
pub use productos::ProductoService;
pub use ventas::VentaService;
