use contracts::domain::a005_nota_venta::aggregate::Pago;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a008_pago")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nota_ref: String,
    pub fecha: chrono::NaiveDate,
    pub monto: f64,
    pub metodo: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Pago {
    fn from(m: Model) -> Self {
        Pago {
            id: m.id,
            nota_ref: m.nota_ref,
            fecha: m.fecha,
            monto: m.monto,
            metodo: m.metodo,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Pago>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_nota(nota_ref: &str) -> anyhow::Result<Vec<Pago>> {
    let items = Entity::find()
        .filter(Column::NotaRef.eq(nota_ref))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_notas(nota_refs: &[String]) -> anyhow::Result<Vec<Pago>> {
    if nota_refs.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::NotaRef.is_in(nota_refs.iter().cloned()))
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

fn to_active(pago: &Pago) -> ActiveModel {
    ActiveModel {
        id: Set(pago.id.clone()),
        nota_ref: Set(pago.nota_ref.clone()),
        fecha: Set(pago.fecha),
        monto: Set(pago.monto),
        metodo: Set(pago.metodo.clone()),
        created_at: Set(pago.created_at),
        updated_at: Set(pago.updated_at),
    }
}

pub async fn insert(pago: &Pago) -> anyhow::Result<()> {
    to_active(pago).insert(conn()).await?;
    Ok(())
}

pub async fn update(pago: &Pago) -> anyhow::Result<()> {
    let mut active = to_active(pago);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
