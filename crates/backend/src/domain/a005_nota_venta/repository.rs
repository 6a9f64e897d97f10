use chrono::Utc;
use contracts::domain::a005_nota_venta::aggregate::{NotaVenta, NotaVentaId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_nota_venta")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub cliente_ref: String,
    pub fecha: chrono::NaiveDate,
    pub subtotal: f64,
    pub descuento: f64,
    pub iva: f64,
    pub total: f64,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for NotaVenta {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        NotaVenta {
            base: BaseAggregate::with_metadata(
                NotaVentaId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            cliente_ref: m.cliente_ref,
            fecha: m.fecha,
            subtotal: m.subtotal,
            descuento: m.descuento,
            iva: m.iva,
            total: m.total,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<NotaVenta>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_many_by_ids(ids: &[String]) -> anyhow::Result<Vec<NotaVenta>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Ids de las notas vigentes dentro de un rango de fechas, más recientes
/// primero. Lo usa el resumen anual para su propia lectura en dos fases.
pub async fn list_ids_by_date_range(
    desde: chrono::NaiveDate,
    hasta: chrono::NaiveDate,
) -> anyhow::Result<Vec<String>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Fecha.gte(desde))
        .filter(Column::Fecha.lte(hasta))
        .order_by_desc(Column::Fecha)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(|m| m.id).collect())
}

/// Ids de todas las notas vigentes (para reconstruir la proyección)
pub async fn list_all_ids() -> anyhow::Result<Vec<String>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(|m| m.id).collect())
}

fn to_active(aggregate: &NotaVenta) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        cliente_ref: Set(aggregate.cliente_ref.clone()),
        fecha: Set(aggregate.fecha),
        subtotal: Set(aggregate.subtotal),
        descuento: Set(aggregate.descuento),
        iva: Set(aggregate.iva),
        total: Set(aggregate.total),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn insert(aggregate: &NotaVenta) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &NotaVenta) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
