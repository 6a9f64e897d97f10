use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Agregado crudo de ventas por vendedor para un rango de fechas
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct VendedorAggregation {
    pub vendedor_ref: String,
    pub vendedor_nombre: String,
    pub num_notas: i64,
    pub total_vendido: f64,
    pub total_cobrado: f64,
}

/// Ventas, cobranza y número de notas por vendedor, sumando sobre las notas
/// de sus clientes dentro del rango
pub async fn get_desempeno_por_vendedor(
    date_from: &str,
    date_to: &str,
) -> Result<Vec<VendedorAggregation>> {
    let db = get_connection();

    let sql = r#"
        SELECT
            v.id AS vendedor_ref,
            v.description AS vendedor_nombre,
            COUNT(n.id) AS num_notas,
            COALESCE(SUM(n.total), 0) AS total_vendido,
            COALESCE(SUM(pg.pagado), 0) AS total_cobrado
        FROM a002_vendedor v
        JOIN a001_cliente c ON c.vendedor_ref = v.id AND c.is_deleted = 0
        JOIN a005_nota_venta n ON n.cliente_ref = c.id AND n.is_deleted = 0
        LEFT JOIN (
            SELECT nota_ref, SUM(monto) AS pagado
            FROM a008_pago
            GROUP BY nota_ref
        ) pg ON pg.nota_ref = n.id
        WHERE v.is_deleted = 0
            AND n.fecha >= ? AND n.fecha <= ?
        GROUP BY v.id, v.description
        ORDER BY total_vendido DESC
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [date_from.into(), date_to.into()],
    );

    let results = VendedorAggregation::find_by_statement(stmt).all(db).await?;

    Ok(results)
}
