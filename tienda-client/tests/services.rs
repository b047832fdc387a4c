// tienda-client/tests/services.rs
// REST services, stock validation and checkout against a mock backend

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::ErrorCode;
use shared::factura::CartItem;
use shared::models::{Cliente, EstadoPedido, MetodoPago, Pedido, Producto, ProductoCreate};
use tienda_client::services::{
    ClienteService, CompraService, FacturaService, PedidoService, ProductoService, VentaService,
};
use tienda_client::stock::{validar_stock, validar_stock_lote};
use tienda_client::{ClientError, EmailNotifier, FacturaSession};

#[derive(Clone, Default)]
struct Backend {
    cambios_estado: Arc<AtomicUsize>,
    compras: Arc<AtomicUsize>,
}

fn producto_json(id: i64) -> Option<Value> {
    match id {
        1 => Some(json!({"id": 1, "descripcion": "Remera", "stock": 5, "precioVenta": 100.0, "stockSeguridad": 2})),
        2 => Some(json!({"id": 2, "descripcion": "Jean", "stock": 1, "precioVenta": 250.0, "stockSeguridad": 3})),
        _ => None,
    }
}

async fn listar_productos() -> Json<Value> {
    Json(json!({"success": true, "code": 0, "message": "OK", "data": [producto_json(1), producto_json(2)]}))
}

async fn obtener_producto(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    match producto_json(id) {
        Some(p) => (StatusCode::OK, Json(p)),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Producto no encontrado"}))),
    }
}

async fn crear_producto() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})))
}

async fn validar_lote(Json(body): Json<Value>) -> Json<Value> {
    let mut faltantes = Vec::new();
    for item in body["items"].as_array().cloned().unwrap_or_default() {
        let id = item["productoId"].as_i64().unwrap_or_default();
        let cantidad = item["cantidad"].as_i64().unwrap_or_default();
        let stock = producto_json(id).and_then(|p| p["stock"].as_i64()).unwrap_or(0);
        if stock < cantidad {
            faltantes.push(json!({
                "productoId": id, "descripcion": "x", "disponible": stock, "solicitado": cantidad
            }));
        }
    }
    Json(json!({"valido": faltantes.is_empty(), "faltantes": faltantes}))
}

async fn crear_factura(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "numeroFactura": "F-0001",
            "subtotal": body["subtotal"],
            "descuento": 0.0,
            "iva": body["iva"],
            "total": body["total"],
            "metodoPago": body["metodoPago"],
        }
    }))
}

async fn cambiar_estado_pedido(
    State(backend): State<Backend>,
    Path(numero): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.cambios_estado.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "numeroPedido": numero,
        "clienteEmail": "ana@example.com",
        "total": 121.0,
        "estado": body["estado"],
    }))
}

async fn compra(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.compras.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "numeroFactura": "F-0100",
        "numeroPedido": "P-0100",
        "total": body["total"],
        "mensaje": "Compra registrada",
    }))
}

async fn cliente_por_email(Path(email): Path<String>) -> (StatusCode, Json<Value>) {
    if email == "ana@example.com" || email == "ana+tienda?x#1@example.com" {
        (StatusCode::OK, Json(json!({"id": 3, "nombre": "Ana", "email": email})))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({})))
    }
}

async fn ventas() -> Json<Value> {
    Json(json!([
        {"id": 1, "total": 100.5, "metodoPago": "EFECTIVO"},
        {"id": 2, "total": 99.5, "metodoPago": "TARJETA"}
    ]))
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/api/productos", get(listar_productos).post(crear_producto))
        .route("/api/productos/validar-stock", post(validar_lote))
        .route("/api/productos/{id}", get(obtener_producto))
        .route("/api/clientes/email/{email}", get(cliente_por_email))
        .route("/api/ventas", get(ventas))
        .route("/facturas", post(crear_factura))
        .route("/pedidos/{numero}/estado", put(cambiar_estado_pedido))
        .route("/compra-integrada/procesar", post(compra))
        .with_state(backend)
}

fn cliente() -> Cliente {
    Cliente {
        id: 3,
        nombre: "Ana".into(),
        apellido: String::new(),
        email: "ana@example.com".into(),
        telefono: None,
        direccion: None,
    }
}

fn producto(id: i64, precio: f64) -> Producto {
    Producto {
        id,
        descripcion: format!("P{}", id),
        categoria_id: None,
        stock: 0,
        precio_compra: 0.0,
        precio_venta: precio,
        stock_seguridad: 0,
        imagenes: vec![],
        variantes: vec![],
    }
}

#[tokio::test]
async fn test_productos_envelope_and_fallback_message() {
    let base = common::spawn(router(Backend::default())).await;
    let http = common::http(&base);
    let service = ProductoService::new(&http);

    let productos = service.listar().await.unwrap();
    assert_eq!(productos.len(), 2);
    assert_eq!(tienda_client::services::productos::stock_bajo(&productos)[0].id, 2);

    let err = service.obtener(99).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.user_message(), "Producto no encontrado");

    let nuevo = ProductoCreate {
        descripcion: "Campera".into(),
        categoria_id: None,
        stock: 1,
        precio_compra: 10.0,
        precio_venta: 20.0,
        stock_seguridad: 0,
        imagenes: vec![],
        variantes: vec![],
    };
    let err = service.crear(&nuevo).await.unwrap_err();
    assert_eq!(err.user_message(), "Error al crear el producto");
}

#[tokio::test]
async fn test_network_failure_has_generic_message() {
    let http = common::unreachable();
    let err = ProductoService::new(&http).listar().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.user_message(), "No se pudo conectar con el servidor");
}

#[tokio::test]
async fn test_stock_validation_per_line_and_batch() {
    let base = common::spawn(router(Backend::default())).await;
    let http = common::http(&base);

    let mut session = FacturaSession::new();
    session.agregar_item(CartItem::desde_producto(&producto(1, 100.0), 2)).unwrap();
    session.agregar_item(CartItem::desde_producto(&producto(2, 250.0), 3)).unwrap();

    let v = validar_stock(&ProductoService::new(&http), &session.items_stock()).await.unwrap();
    assert_eq!(v.mensajes(), vec!["Stock insuficiente para Jean: disponible 1, solicitado 3"]);

    let lote = validar_stock_lote(&http, &session.items_stock()).await.unwrap();
    assert_eq!(lote.faltantes.len(), 1);
    assert_eq!(lote.faltantes[0].producto_id, 2);
}

#[tokio::test]
async fn test_factura_from_session() {
    let base = common::spawn(router(Backend::default())).await;
    let http = common::http(&base);
    let service = FacturaService::new(&http);

    let mut session = FacturaSession::new();
    session.agregar_item(CartItem::desde_producto(&producto(1, 100.0), 2)).unwrap();
    let err = service.crear(&session).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::CustomerRequired);

    session.establecer_cliente(Some(cliente()));
    session.establecer_metodo_pago(MetodoPago::Tarjeta);
    let factura = service.crear(&session).await.unwrap();
    assert_eq!(factura.numero, "F-0001");
    assert_eq!(factura.total, 242.0);
    assert_eq!(factura.metodo_pago, MetodoPago::Tarjeta);
}

#[tokio::test]
async fn test_pedido_transition_checked_before_request() {
    let backend = Backend::default();
    let base = common::spawn(router(backend.clone())).await;
    let http = common::http(&base);
    let notifier = EmailNotifier::new(None).unwrap();
    let service = PedidoService::new(&http).with_notifier(&notifier);

    let pedido = Pedido {
        numero: "P-1".into(),
        cliente_email: "ana@example.com".into(),
        items: vec![],
        total: 121.0,
        estado: EstadoPedido::Pendiente,
        fecha: None,
        direccion_envio: None,
    };

    let err = service
        .actualizar_estado(&pedido, EstadoPedido::Entregado)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderInvalidTransition);
    assert_eq!(backend.cambios_estado.load(Ordering::SeqCst), 0);

    let actualizado = service
        .actualizar_estado(&pedido, EstadoPedido::Confirmado)
        .await
        .unwrap();
    assert_eq!(actualizado.estado, EstadoPedido::Confirmado);
    assert_eq!(backend.cambios_estado.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_compra_rejects_shortfall_then_succeeds() {
    let backend = Backend::default();
    let base = common::spawn(router(backend.clone())).await;
    let http = common::http(&base);
    let service = CompraService::new(&http);

    let mut session = FacturaSession::new();
    session.agregar_item(CartItem::desde_producto(&producto(2, 250.0), 2)).unwrap();
    let err = service
        .procesar(&session, "ana@example.com", None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProductOutOfStock);
    assert_eq!(backend.compras.load(Ordering::SeqCst), 0);

    session.limpiar();
    session.agregar_item(CartItem::desde_producto(&producto(1, 100.0), 2)).unwrap();
    let respuesta = service
        .procesar(&session, "ana@example.com", Some("Calle 1".into()))
        .await
        .unwrap();
    assert_eq!(respuesta.numero_factura, "F-0100");
    assert_eq!(respuesta.numero_pedido.as_deref(), Some("P-0100"));
    assert_eq!(respuesta.total, 242.0);
    assert_eq!(respuesta.message.as_deref(), Some("Compra registrada"));
}

#[tokio::test]
async fn test_cliente_por_email_and_ventas_resumen() {
    let base = common::spawn(router(Backend::default())).await;
    let http = common::http(&base);

    let clientes = ClienteService::new(&http);
    assert_eq!(clientes.por_email("ana@example.com").await.unwrap().unwrap().id, 3);
    assert!(clientes.por_email("nadie@example.com").await.unwrap().is_none());
    let raro = clientes.por_email(" ana+tienda?x#1@example.com ").await.unwrap().unwrap();
    assert_eq!(raro.email, "ana+tienda?x#1@example.com");

    let (ventas, resumen) = VentaService::new(&http).resumen().await.unwrap();
    assert_eq!(ventas.len(), 2);
    assert_eq!(resumen.total, 200.0);
    assert_eq!(resumen.ticket_promedio, 100.0);
}
