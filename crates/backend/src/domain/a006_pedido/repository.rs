use contracts::domain::a005_nota_venta::aggregate::Pedido;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_pedido")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nota_ref: String,
    pub producto_ref: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Pedido {
    fn from(m: Model) -> Self {
        Pedido {
            id: m.id,
            nota_ref: m.nota_ref,
            producto_ref: m.producto_ref,
            cantidad: m.cantidad,
            precio_unitario: m.precio_unitario,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Pedido>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_nota(nota_ref: &str) -> anyhow::Result<Vec<Pedido>> {
    let items = Entity::find()
        .filter(Column::NotaRef.eq(nota_ref))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_notas(nota_refs: &[String]) -> anyhow::Result<Vec<Pedido>> {
    if nota_refs.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::NotaRef.is_in(nota_refs.iter().cloned()))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

fn to_active(pedido: &Pedido) -> ActiveModel {
    ActiveModel {
        id: Set(pedido.id.clone()),
        nota_ref: Set(pedido.nota_ref.clone()),
        producto_ref: Set(pedido.producto_ref.clone()),
        cantidad: Set(pedido.cantidad),
        precio_unitario: Set(pedido.precio_unitario),
        created_at: Set(pedido.created_at),
        updated_at: Set(pedido.updated_at),
    }
}

pub async fn insert(pedido: &Pedido) -> anyhow::Result<()> {
    to_active(pedido).insert(conn()).await?;
    Ok(())
}

pub async fn update(pedido: &Pedido) -> anyhow::Result<()> {
    let mut active = to_active(pedido);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
