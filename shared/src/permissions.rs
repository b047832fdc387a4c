//! Static role → route permission table
//!
//! Each role sees a fixed list of back-office sections. Access to a path
//! is granted iff the path appears in the role's list.

use crate::models::{Rol, RouteDescriptor};

const DASHBOARD: RouteDescriptor = RouteDescriptor {
    name: "Dashboard",
    icon: "home",
    path: "/dashboard",
    description: "Resumen general del negocio",
};

const PRODUCTOS: RouteDescriptor = RouteDescriptor {
    name: "Productos",
    icon: "shirt",
    path: "/productos",
    description: "Alta, baja y modificación de productos",
};

const INVENTARIO: RouteDescriptor = RouteDescriptor {
    name: "Inventario",
    icon: "boxes",
    path: "/inventario",
    description: "Control de stock y stock de seguridad",
};

const POS: RouteDescriptor = RouteDescriptor {
    name: "Punto de venta",
    icon: "cash-register",
    path: "/pos",
    description: "Facturación en caja",
};

const VENTAS: RouteDescriptor = RouteDescriptor {
    name: "Ventas",
    icon: "receipt",
    path: "/ventas",
    description: "Historial de ventas",
};

const CLIENTES: RouteDescriptor = RouteDescriptor {
    name: "Clientes",
    icon: "users",
    path: "/clientes",
    description: "Gestión de clientes",
};

const EMPLEADOS: RouteDescriptor = RouteDescriptor {
    name: "Empleados",
    icon: "id-badge",
    path: "/empleados",
    description: "Gestión de empleados y roles",
};

const PEDIDOS: RouteDescriptor = RouteDescriptor {
    name: "Pedidos",
    icon: "truck",
    path: "/pedidos",
    description: "Seguimiento de pedidos de la tienda online",
};

const MARKETING: RouteDescriptor = RouteDescriptor {
    name: "Marketing",
    icon: "bullhorn",
    path: "/marketing",
    description: "Promociones y códigos de descuento",
};

const REPORTES: RouteDescriptor = RouteDescriptor {
    name: "Reportes",
    icon: "chart-bar",
    path: "/reportes",
    description: "Reportes de ventas y stock",
};

const ADMIN_ROUTES: &[RouteDescriptor] = &[
    DASHBOARD, PRODUCTOS, INVENTARIO, POS, VENTAS, CLIENTES, EMPLEADOS, PEDIDOS, MARKETING,
    REPORTES,
];

const VENDEDOR_ROUTES: &[RouteDescriptor] = &[DASHBOARD, POS, VENTAS, CLIENTES, PEDIDOS];

const INVENTARIO_ROUTES: &[RouteDescriptor] = &[DASHBOARD, PRODUCTOS, INVENTARIO, PEDIDOS];

const MARKETING_ROUTES: &[RouteDescriptor] = &[DASHBOARD, MARKETING, CLIENTES, REPORTES];

/// Sections visible to a role, in menu order
pub fn rutas_para(rol: Rol) -> &'static [RouteDescriptor] {
    match rol {
        Rol::Admin => ADMIN_ROUTES,
        Rol::Vendedor => VENDEDOR_ROUTES,
        Rol::Inventario => INVENTARIO_ROUTES,
        Rol::Marketing => MARKETING_ROUTES,
    }
}

/// Strip query/fragment and trailing slash: `/pos/?x=1` → `/pos`
pub fn normalizar_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Whether `path` is listed for `rol`
pub fn can_access(rol: Rol, path: &str) -> bool {
    let path = normalizar_path(path);
    rutas_para(rol).iter().any(|r| r.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_access_iff_listed() {
        for rol in Rol::ALL {
            for ruta in ADMIN_ROUTES {
                let listed = rutas_para(rol).iter().any(|r| r.path == ruta.path);
                assert_eq!(can_access(rol, ruta.path), listed, "{} {}", rol, ruta.path);
            }
        }
    }

    #[test]
    fn test_marketing_cannot_access_empleados() {
        assert!(!can_access(Rol::Marketing, "/empleados"));
        assert!(can_access(Rol::Marketing, "/marketing"));
    }

    #[test]
    fn test_admin_accesses_everything() {
        for ruta in ADMIN_ROUTES {
            assert!(can_access(Rol::Admin, ruta.path));
        }
    }

    #[test]
    fn test_unknown_path_denied() {
        assert!(!can_access(Rol::Admin, "/configuracion-secreta"));
        assert!(!can_access(Rol::Vendedor, ""));
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(normalizar_path("/pos/"), "/pos");
        assert_eq!(normalizar_path("/pos?cliente=3"), "/pos");
        assert_eq!(normalizar_path("/"), "/");
        assert!(can_access(Rol::Vendedor, "/ventas/?page=2"));
    }

    #[test]
    fn test_vendedor_and_inventario_tables() {
        assert!(can_access(Rol::Vendedor, "/pos"));
        assert!(!can_access(Rol::Vendedor, "/empleados"));
        assert!(!can_access(Rol::Vendedor, "/productos"));
        assert!(can_access(Rol::Inventario, "/inventario"));
        assert!(!can_access(Rol::Inventario, "/pos"));
    }
}
