//! Route guards
//!
//! Two synchronous predicates compose over every back-office route: one
//! requires an authenticated user, the other requires the user's role to
//! be in the route's allow-list and to pass the permission table.

use crate::models::{Rol, Usuario};
use crate::permissions::{can_access, normalizar_path};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Result of evaluating a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(&'static str),
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }
}

/// Back-office route with its explicit role allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardedRoute {
    pub path: &'static str,
    pub roles: &'static [Rol],
}

const TODOS: &[Rol] = &[Rol::Admin, Rol::Vendedor, Rol::Inventario, Rol::Marketing];

/// Every guarded back-office route
pub const GUARDED_ROUTES: &[GuardedRoute] = &[
    GuardedRoute { path: "/dashboard", roles: TODOS },
    GuardedRoute { path: "/productos", roles: &[Rol::Admin, Rol::Inventario] },
    GuardedRoute { path: "/inventario", roles: &[Rol::Admin, Rol::Inventario] },
    GuardedRoute { path: "/pos", roles: &[Rol::Admin, Rol::Vendedor] },
    GuardedRoute { path: "/ventas", roles: &[Rol::Admin, Rol::Vendedor] },
    GuardedRoute { path: "/clientes", roles: &[Rol::Admin, Rol::Vendedor, Rol::Marketing] },
    GuardedRoute { path: "/empleados", roles: &[Rol::Admin] },
    GuardedRoute { path: "/pedidos", roles: &[Rol::Admin, Rol::Vendedor, Rol::Inventario] },
    GuardedRoute { path: "/marketing", roles: &[Rol::Admin, Rol::Marketing] },
    GuardedRoute { path: "/reportes", roles: &[Rol::Admin, Rol::Marketing] },
];

/// Lookup the guarded route for a path
pub fn ruta(path: &str) -> Option<&'static GuardedRoute> {
    let path = normalizar_path(path);
    GUARDED_ROUTES.iter().find(|r| r.path == path)
}

/// Require an authenticated user
pub fn require_auth(user: Option<&Usuario>) -> GuardOutcome {
    match user {
        Some(_) => GuardOutcome::Allow,
        None => GuardOutcome::Redirect(LOGIN_PATH),
    }
}

/// Require a role in `allowed` that can also access `path`
pub fn require_role(user: Option<&Usuario>, allowed: &[Rol], path: &str) -> GuardOutcome {
    let Some(user) = user else {
        return GuardOutcome::Redirect(LOGIN_PATH);
    };
    if allowed.contains(&user.rol) && can_access(user.rol, path) {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect(UNAUTHORIZED_PATH)
    }
}

/// Both guards, in order
pub fn guard(user: Option<&Usuario>, route: &GuardedRoute) -> GuardOutcome {
    match require_auth(user) {
        GuardOutcome::Allow => require_role(user, route.roles, route.path),
        redirect => redirect,
    }
}

/// Guard an arbitrary path; paths outside the table are unauthorized
pub fn guard_path(user: Option<&Usuario>, path: &str) -> GuardOutcome {
    if let GuardOutcome::Redirect(to) = require_auth(user) {
        return GuardOutcome::Redirect(to);
    }
    match ruta(path) {
        Some(route) => guard(user, route),
        None => GuardOutcome::Redirect(UNAUTHORIZED_PATH),
    }
}
