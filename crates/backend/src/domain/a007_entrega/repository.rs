use contracts::domain::a005_nota_venta::aggregate::Entrega;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_entrega")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub pedido_ref: String,
    pub cantidad: f64,
    pub fecha_entrega: chrono::NaiveDate,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Entrega {
    fn from(m: Model) -> Self {
        Entrega {
            id: m.id,
            pedido_ref: m.pedido_ref,
            cantidad: m.cantidad,
            fecha_entrega: m.fecha_entrega,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Entrega>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_pedido(pedido_ref: &str) -> anyhow::Result<Vec<Entrega>> {
    let items = Entity::find()
        .filter(Column::PedidoRef.eq(pedido_ref))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_pedidos(pedido_refs: &[String]) -> anyhow::Result<Vec<Entrega>> {
    if pedido_refs.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::PedidoRef.is_in(pedido_refs.iter().cloned()))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

fn to_active(entrega: &Entrega) -> ActiveModel {
    ActiveModel {
        id: Set(entrega.id.clone()),
        pedido_ref: Set(entrega.pedido_ref.clone()),
        cantidad: Set(entrega.cantidad),
        fecha_entrega: Set(entrega.fecha_entrega),
        created_at: Set(entrega.created_at),
        updated_at: Set(entrega.updated_at),
    }
}

pub async fn insert(entrega: &Entrega) -> anyhow::Result<()> {
    to_active(entrega).insert(conn()).await?;
    Ok(())
}

pub async fn update(entrega: &Entrega) -> anyhow::Result<()> {
    let mut active = to_active(entrega);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_by_pedido(pedido_ref: &str) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::PedidoRef.eq(pedido_ref))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}
