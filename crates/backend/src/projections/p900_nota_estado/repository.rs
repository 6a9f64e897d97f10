//! Tabla de lectura `p900_nota_estado`: una fila por nota vigente con los
//! estados derivados redundantes. Sólo sirve para filtrar/contar ids; el
//! listado vuelve a derivar sobre los agregados vivos.

use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, FromQueryResult, QueryFilter, Set, Statement};
use serde::{Deserialize, Serialize};

use contracts::enums::{EstadoCredito, EstadoEntrega, EstadoPago};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "p900_nota_estado")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub nota_ref: String,
    pub folio: String,
    pub fecha: chrono::NaiveDate,
    pub cliente_ref: String,
    pub cliente_nombre: String,
    pub total: f64,
    pub total_pagado: f64,
    pub saldo: f64,
    pub porcentaje_pagado: f64,
    pub estado_pago: String,
    pub partidas_total: i64,
    pub partidas_entregadas: i64,
    pub porcentaje_entrega: f64,
    pub estado_entrega: String,
    /// El estado de crédito no se almacena: se evalúa en SQL contra esta
    /// fecha para que la fila no caduque con el paso de los días
    pub fecha_vencimiento: chrono::NaiveDate,
    pub dias_credito: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn upsert_row(row: &Model) -> Result<()> {
    // delete + insert: la fila es pequeña y la clave es la nota
    delete_by_nota(&row.nota_ref).await?;

    let active = ActiveModel {
        nota_ref: Set(row.nota_ref.clone()),
        folio: Set(row.folio.clone()),
        fecha: Set(row.fecha),
        cliente_ref: Set(row.cliente_ref.clone()),
        cliente_nombre: Set(row.cliente_nombre.clone()),
        total: Set(row.total),
        total_pagado: Set(row.total_pagado),
        saldo: Set(row.saldo),
        porcentaje_pagado: Set(row.porcentaje_pagado),
        estado_pago: Set(row.estado_pago.clone()),
        partidas_total: Set(row.partidas_total),
        partidas_entregadas: Set(row.partidas_entregadas),
        porcentaje_entrega: Set(row.porcentaje_entrega),
        estado_entrega: Set(row.estado_entrega.clone()),
        fecha_vencimiento: Set(row.fecha_vencimiento),
        dias_credito: Set(row.dias_credito),
    };
    Entity::insert(active).exec(conn()).await?;
    Ok(())
}

pub async fn delete_by_nota(nota_ref: &str) -> Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::NotaRef.eq(nota_ref))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

/// Filtros ya tipados del listado
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosNota {
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
    pub cliente_ref: Option<String>,
    pub estado_pago: Option<EstadoPago>,
    pub estado_entrega: Option<EstadoEntrega>,
    pub estado_credito: Option<EstadoCredito>,
}

/// Arma la cláusula WHERE y sus parámetros posicionales. El estado de
/// crédito se evalúa contra `date('now')` en SQL (fechas ISO, comparación
/// lexicográfica exacta).
fn construir_where(f: &FiltrosNota) -> (String, Vec<sea_orm::Value>) {
    let mut sql = String::from(" WHERE 1=1");
    let mut params: Vec<sea_orm::Value> = vec![];

    if let Some(desde) = &f.fecha_desde {
        sql.push_str(" AND fecha >= ?");
        params.push(desde.to_string().into());
    }
    if let Some(hasta) = &f.fecha_hasta {
        sql.push_str(" AND fecha <= ?");
        params.push(hasta.to_string().into());
    }
    if let Some(cliente) = &f.cliente_ref {
        sql.push_str(" AND cliente_ref = ?");
        params.push(cliente.clone().into());
    }
    if let Some(estado) = &f.estado_pago {
        sql.push_str(" AND estado_pago = ?");
        params.push(estado.code().into());
    }
    if let Some(estado) = &f.estado_entrega {
        sql.push_str(" AND estado_entrega = ?");
        params.push(estado.code().into());
    }
    match f.estado_credito {
        Some(EstadoCredito::Vencido) => {
            sql.push_str(" AND fecha_vencimiento <= date('now')");
        }
        Some(EstadoCredito::PorVencer) => {
            sql.push_str(
                " AND fecha_vencimiento > date('now') AND fecha_vencimiento <= date('now', '+7 days')",
            );
        }
        Some(EstadoCredito::Vigente) => {
            sql.push_str(" AND fecha_vencimiento > date('now', '+7 days')");
        }
        None => {}
    }

    (sql, params)
}

/// Fase 1 del listado: ids de la ventana pedida + total de coincidencias
pub async fn filtrar_ids(
    filtros: &FiltrosNota,
    limit: u64,
    offset: u64,
) -> Result<(Vec<String>, i64)> {
    let (where_sql, params) = construir_where(filtros);

    #[derive(Debug, FromQueryResult)]
    struct IdRow {
        nota_ref: String,
    }

    let mut ids_sql = format!("SELECT nota_ref FROM p900_nota_estado{}", where_sql);
    ids_sql.push_str(" ORDER BY fecha DESC, folio DESC LIMIT ? OFFSET ?");
    let mut ids_params = params.clone();
    ids_params.push((limit as i64).into());
    ids_params.push((offset as i64).into());

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, &ids_sql, ids_params);
    let ids: Vec<String> = IdRow::find_by_statement(stmt)
        .all(conn())
        .await?
        .into_iter()
        .map(|r| r.nota_ref)
        .collect();

    #[derive(Debug, FromQueryResult)]
    struct CountRow {
        total: i64,
    }

    let count_sql = format!(
        "SELECT COUNT(*) AS total FROM p900_nota_estado{}",
        where_sql
    );
    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, &count_sql, params);
    let total = CountRow::find_by_statement(stmt)
        .one(conn())
        .await?
        .map(|r| r.total)
        .unwrap_or(0);

    Ok((ids, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, dd: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dd).unwrap()
    }

    #[test]
    fn test_sin_filtros() {
        let (sql, params) = construir_where(&FiltrosNota::default());
        assert_eq!(sql, " WHERE 1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_filtro_estado_pago() {
        let filtros = FiltrosNota {
            estado_pago: Some(EstadoPago::Pagado),
            ..Default::default()
        };
        let (sql, params) = construir_where(&filtros);
        assert!(sql.contains("estado_pago = ?"));
        assert_eq!(params.len(), 1);
        assert_eq!(params[0], sea_orm::Value::from("pagado"));
    }

    #[test]
    fn test_filtro_rango_fechas() {
        let filtros = FiltrosNota {
            fecha_desde: Some(d(2026, 1, 1)),
            fecha_hasta: Some(d(2026, 12, 31)),
            ..Default::default()
        };
        let (sql, params) = construir_where(&filtros);
        assert!(sql.contains("fecha >= ?"));
        assert!(sql.contains("fecha <= ?"));
        assert_eq!(params[0], sea_orm::Value::from("2026-01-01"));
        assert_eq!(params[1], sea_orm::Value::from("2026-12-31"));
    }

    #[test]
    fn test_credito_se_evalua_en_sql() {
        let filtros = FiltrosNota {
            estado_credito: Some(EstadoCredito::Vencido),
            ..Default::default()
        };
        let (sql, params) = construir_where(&filtros);
        assert!(sql.contains("fecha_vencimiento <= date('now')"));
        assert!(params.is_empty());

        let filtros = FiltrosNota {
            estado_credito: Some(EstadoCredito::PorVencer),
            ..Default::default()
        };
        let (sql, _) = construir_where(&filtros);
        assert!(sql.contains("date('now', '+7 days')"));
    }

    #[test]
    fn test_filtros_combinados_en_orden() {
        let filtros = FiltrosNota {
            fecha_desde: Some(d(2026, 3, 1)),
            cliente_ref: Some("abc".into()),
            estado_entrega: Some(EstadoEntrega::Parcial),
            ..Default::default()
        };
        let (sql, params) = construir_where(&filtros);
        let pos_fecha = sql.find("fecha >=").unwrap();
        let pos_cliente = sql.find("cliente_ref").unwrap();
        let pos_entrega = sql.find("estado_entrega").unwrap();
        assert!(pos_fecha < pos_cliente && pos_cliente < pos_entrega);
        assert_eq!(params.len(), 3);
        assert_eq!(params[2], sea_orm::Value::from("parcial"));
    }
}
