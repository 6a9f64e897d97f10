pub mod api;
pub mod dashboards;
pub mod domain;
pub mod projections;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Logs a consola y a archivo bajo target/logs
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // silencia el SQL, conserva los logs de la aplicación
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Middleware sencillo de log de peticiones
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        tracing::info!(
            target: "http",
            "{} {} {} {}ms",
            response.status().as_u16(),
            method,
            uri.path(),
            start.elapsed().as_millis()
        );

        response
    }

    // Base de datos (la ruta viene de config.toml junto al ejecutable)
    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // La proyección de estados se reconstruye al arrancar para que los
    // filtros reflejen la derivación vigente
    projections::p900_nota_estado::projection_builder::rebuild_all().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // Clientes
        .route(
            "/api/cliente",
            get(api::handlers::a001_cliente::list_all).post(api::handlers::a001_cliente::upsert),
        )
        .route(
            "/api/cliente/:id",
            get(api::handlers::a001_cliente::get_by_id)
                .delete(api::handlers::a001_cliente::delete),
        )
        // Vendedores
        .route(
            "/api/vendedor",
            get(api::handlers::a002_vendedor::list_all).post(api::handlers::a002_vendedor::upsert),
        )
        .route(
            "/api/vendedor/:id",
            get(api::handlers::a002_vendedor::get_by_id)
                .delete(api::handlers::a002_vendedor::delete),
        )
        // Productos
        .route(
            "/api/producto",
            get(api::handlers::a003_producto::list_all).post(api::handlers::a003_producto::upsert),
        )
        .route(
            "/api/producto/:id",
            get(api::handlers::a003_producto::get_by_id)
                .delete(api::handlers::a003_producto::delete),
        )
        // Proveedores
        .route(
            "/api/proveedor",
            get(api::handlers::a004_proveedor::list_all)
                .post(api::handlers::a004_proveedor::upsert),
        )
        .route(
            "/api/proveedor/:id",
            get(api::handlers::a004_proveedor::get_by_id)
                .delete(api::handlers::a004_proveedor::delete),
        )
        // Notas de venta
        .route("/api/nota_venta", post(api::handlers::a005_nota_venta::upsert))
        .route(
            "/api/nota_venta/list",
            get(api::handlers::a005_nota_venta::list),
        )
        .route(
            "/api/nota_venta/:id",
            get(api::handlers::a005_nota_venta::get_detalle)
                .delete(api::handlers::a005_nota_venta::delete),
        )
        // Renglones de las notas
        .route("/api/pedido", post(api::handlers::a006_pedido::upsert))
        .route(
            "/api/pedido/:id",
            axum::routing::delete(api::handlers::a006_pedido::delete),
        )
        .route("/api/entrega", post(api::handlers::a007_entrega::upsert))
        .route(
            "/api/entrega/:id",
            axum::routing::delete(api::handlers::a007_entrega::delete),
        )
        .route("/api/pago", post(api::handlers::a008_pago::upsert))
        .route(
            "/api/pago/:id",
            axum::routing::delete(api::handlers::a008_pago::delete),
        )
        // Proyección de estados
        .route(
            "/api/p900/rebuild",
            post(api::handlers::p900_nota_estado::rebuild),
        )
        // Tablero anual
        .route(
            "/api/d400/resumen_anual",
            get(api::handlers::d400_resumen_anual::get_resumen_anual),
        )
        .route(
            "/api/d400/desempeno_vendedores",
            get(api::handlers::d400_resumen_anual::get_desempeno_vendedores),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
