use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_A001_CLIENTE: &str = r#"
    CREATE TABLE a001_cliente (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        contacto TEXT NOT NULL DEFAULT '',
        telefono TEXT NOT NULL DEFAULT '',
        correo TEXT NOT NULL DEFAULT '',
        dias_credito INTEGER NOT NULL DEFAULT 0,
        vendedor_ref TEXT,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A002_VENDEDOR: &str = r#"
    CREATE TABLE a002_vendedor (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        telefono TEXT NOT NULL DEFAULT '',
        correo TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A003_PRODUCTO: &str = r#"
    CREATE TABLE a003_producto (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        presentacion TEXT NOT NULL DEFAULT '',
        unidad TEXT NOT NULL DEFAULT '',
        precio_lista REAL NOT NULL DEFAULT 0,
        existencias REAL NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A004_PROVEEDOR: &str = r#"
    CREATE TABLE a004_proveedor (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        contacto TEXT NOT NULL DEFAULT '',
        telefono TEXT NOT NULL DEFAULT '',
        correo TEXT NOT NULL DEFAULT '',
        materiales TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A005_NOTA_VENTA: &str = r#"
    CREATE TABLE a005_nota_venta (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        cliente_ref TEXT NOT NULL,
        fecha TEXT NOT NULL,
        subtotal REAL NOT NULL DEFAULT 0,
        descuento REAL NOT NULL DEFAULT 0,
        iva REAL NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A006_PEDIDO: &str = r#"
    CREATE TABLE a006_pedido (
        id TEXT PRIMARY KEY NOT NULL,
        nota_ref TEXT NOT NULL,
        producto_ref TEXT NOT NULL,
        cantidad REAL NOT NULL DEFAULT 0,
        precio_unitario REAL NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT
    );
"#;

const CREATE_A007_ENTREGA: &str = r#"
    CREATE TABLE a007_entrega (
        id TEXT PRIMARY KEY NOT NULL,
        pedido_ref TEXT NOT NULL,
        cantidad REAL NOT NULL DEFAULT 0,
        fecha_entrega TEXT NOT NULL,
        created_at TEXT,
        updated_at TEXT
    );
"#;

const CREATE_A008_PAGO: &str = r#"
    CREATE TABLE a008_pago (
        id TEXT PRIMARY KEY NOT NULL,
        nota_ref TEXT NOT NULL,
        fecha TEXT NOT NULL,
        monto REAL NOT NULL DEFAULT 0,
        metodo TEXT NOT NULL DEFAULT '',
        created_at TEXT,
        updated_at TEXT
    );
"#;

// Modelo de lectura del listado: una fila por nota no borrada con los
// estados derivados redundantes. El estado de crédito NO se guarda; se
// calcula en SQL a partir de fecha_vencimiento para que las filas no
// caduquen con el paso de los días.
const CREATE_P900_NOTA_ESTADO: &str = r#"
    CREATE TABLE p900_nota_estado (
        nota_ref TEXT PRIMARY KEY NOT NULL,
        folio TEXT NOT NULL,
        fecha TEXT NOT NULL,
        cliente_ref TEXT NOT NULL,
        cliente_nombre TEXT NOT NULL DEFAULT '',
        total REAL NOT NULL DEFAULT 0,
        total_pagado REAL NOT NULL DEFAULT 0,
        saldo REAL NOT NULL DEFAULT 0,
        porcentaje_pagado REAL NOT NULL DEFAULT 0,
        estado_pago TEXT NOT NULL,
        partidas_total INTEGER NOT NULL DEFAULT 0,
        partidas_entregadas INTEGER NOT NULL DEFAULT 0,
        porcentaje_entrega REAL NOT NULL DEFAULT 0,
        estado_entrega TEXT NOT NULL,
        fecha_vencimiento TEXT NOT NULL,
        dias_credito INTEGER NOT NULL DEFAULT 0
    );
"#;

const TABLAS: &[(&str, &str)] = &[
    ("a001_cliente", CREATE_A001_CLIENTE),
    ("a002_vendedor", CREATE_A002_VENDEDOR),
    ("a003_producto", CREATE_A003_PRODUCTO),
    ("a004_proveedor", CREATE_A004_PROVEEDOR),
    ("a005_nota_venta", CREATE_A005_NOTA_VENTA),
    ("a006_pedido", CREATE_A006_PEDIDO),
    ("a007_entrega", CREATE_A007_ENTREGA),
    ("a008_pago", CREATE_A008_PAGO),
    ("p900_nota_estado", CREATE_P900_NOTA_ESTADO),
];

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/plastigest.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    for (nombre, create_sql) in TABLAS {
        ensure_table(&conn, nombre, create_sql).await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Minimal schema bootstrap: create the table when sqlite_master doesn't
/// know it yet.
async fn ensure_table(
    conn: &DatabaseConnection,
    nombre: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        nombre
    );
    let existing = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", nombre);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
