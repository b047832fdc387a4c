//! Unified error codes
//!
//! Codes shared by the back-office panel, the storefront and the backend.
//! Organized by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Invoice / order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / stock errors
//! - 7xxx: Marketing errors
//! - 8xxx: Customer / employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so the frontend and backend agree on values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,
    RequiredField = 7,
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenInvalid = 1004,
    ExternalAuthFailed = 1008,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,
    RoleRequired = 2002,

    // ==================== 4xxx: Invoice / Order ====================
    InvoiceNotFound = 4001,
    OrderNotFound = 4002,
    CartEmpty = 4007,
    CartItemNotFound = 4008,
    CustomerRequired = 4009,
    OrderInvalidTransition = 4010,

    // ==================== 5xxx: Payment ====================
    PaymentFailed = 5001,
    PaymentInvalidMethod = 5003,

    // ==================== 6xxx: Product ====================
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,
    ProductOutOfStock = 6003,
    CategoryNotFound = 6101,
    VariantNotFound = 6201,

    // ==================== 7xxx: Marketing ====================
    PromotionNotFound = 7001,
    PromotionInactive = 7002,
    PromotionExpired = 7003,
    PromotionUsageExhausted = 7004,
    PromotionUnsupported = 7005,
    PromotionNotStarted = 7006,

    // ==================== 8xxx: Customer / Employee ====================
    CustomerNotFound = 8001,
    CustomerEmailExists = 8002,
    EmployeeNotFound = 8101,
    EmployeeUsernameExists = 8102,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
    StorageError = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default user-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operación completada",
            ErrorCode::Unknown => "Ocurrió un error desconocido",
            ErrorCode::ValidationFailed => "Error de validación",
            ErrorCode::NotFound => "Recurso no encontrado",
            ErrorCode::AlreadyExists => "El recurso ya existe",
            ErrorCode::InvalidRequest => "Solicitud inválida",
            ErrorCode::RequiredField => "Falta un campo obligatorio",
            ErrorCode::ValueOutOfRange => "Valor fuera de rango",

            // Auth
            ErrorCode::NotAuthenticated => "Usuario no autenticado",
            ErrorCode::InvalidCredentials => "Credenciales inválidas",
            ErrorCode::TokenInvalid => "Token de sesión inválido",
            ErrorCode::ExternalAuthFailed => "Error al iniciar sesión con Google",

            // Permission
            ErrorCode::PermissionDenied => "Acceso denegado",
            ErrorCode::RoleRequired => "Su rol no tiene acceso a esta sección",

            // Invoice / Order
            ErrorCode::InvoiceNotFound => "Factura no encontrada",
            ErrorCode::OrderNotFound => "Pedido no encontrado",
            ErrorCode::CartEmpty => "El carrito está vacío",
            ErrorCode::CartItemNotFound => "El producto no está en el carrito",
            ErrorCode::CustomerRequired => "Debe seleccionar un cliente",
            ErrorCode::OrderInvalidTransition => "Cambio de estado no permitido",

            // Payment
            ErrorCode::PaymentFailed => "Error al procesar el pago",
            ErrorCode::PaymentInvalidMethod => "Método de pago inválido",

            // Product
            ErrorCode::ProductNotFound => "Producto no encontrado",
            ErrorCode::ProductInvalidPrice => "Precio de producto inválido",
            ErrorCode::ProductOutOfStock => "Stock insuficiente",
            ErrorCode::CategoryNotFound => "Categoría no encontrada",
            ErrorCode::VariantNotFound => "Variante no encontrada",

            // Marketing
            ErrorCode::PromotionNotFound => "Promoción no encontrada",
            ErrorCode::PromotionInactive => "La promoción no está activa",
            ErrorCode::PromotionExpired => "La promoción no está vigente",
            ErrorCode::PromotionUsageExhausted => "La promoción alcanzó su límite de usos",
            ErrorCode::PromotionUnsupported => "Tipo de promoción no aplicable en caja",
            ErrorCode::PromotionNotStarted => "La promoción todavía no comenzó",

            // Customer / Employee
            ErrorCode::CustomerNotFound => "Cliente no encontrado",
            ErrorCode::CustomerEmailExists => "El email ya está registrado",
            ErrorCode::EmployeeNotFound => "Empleado no encontrado",
            ErrorCode::EmployeeUsernameExists => "El nombre de usuario ya existe",

            // System
            ErrorCode::InternalError => "Error interno del servidor",
            ErrorCode::NetworkError => "Error de conexión",
            ErrorCode::TimeoutError => "Tiempo de espera agotado",
            ErrorCode::ConfigError => "Error de configuración",
            ErrorCode::StorageError => "Error de almacenamiento local",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::ExternalAuthFailed),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Invoice / Order
            4001 => Ok(ErrorCode::InvoiceNotFound),
            4002 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::CartEmpty),
            4008 => Ok(ErrorCode::CartItemNotFound),
            4009 => Ok(ErrorCode::CustomerRequired),
            4010 => Ok(ErrorCode::OrderInvalidTransition),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6201 => Ok(ErrorCode::VariantNotFound),

            // Marketing
            7001 => Ok(ErrorCode::PromotionNotFound),
            7002 => Ok(ErrorCode::PromotionInactive),
            7003 => Ok(ErrorCode::PromotionExpired),
            7004 => Ok(ErrorCode::PromotionUsageExhausted),
            7005 => Ok(ErrorCode::PromotionUnsupported),
            7006 => Ok(ErrorCode::PromotionNotStarted),

            // Customer / Employee
            8001 => Ok(ErrorCode::CustomerNotFound),
            8002 => Ok(ErrorCode::CustomerEmailExists),
            8101 => Ok(ErrorCode::EmployeeNotFound),
            8102 => Ok(ErrorCode::EmployeeUsernameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9401 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
