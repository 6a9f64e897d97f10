use axum::{
    extract::{Path, Query},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use contracts::domain::a005_nota_venta::aggregate::NotaVentaDto;
use contracts::domain::a005_nota_venta::dto::NotaDetalleDto;
use contracts::projections::p900_nota_estado::{NotaListRequest, NotaListResponse};

use crate::domain::a005_nota_venta;
use crate::projections::p900_nota_estado;
use crate::shared::error::ServiceError;

/// GET /api/nota_venta/list: listado paginado con filtros sobre la
/// proyección de estados
pub async fn list(
    Query(req): Query<NotaListRequest>,
) -> Result<Json<NotaListResponse>, ServiceError> {
    let response = p900_nota_estado::service::listar(req).await?;
    Ok(Json(response))
}

/// GET /api/nota_venta/:id: detalle completo con estados derivados
pub async fn get_detalle(Path(id): Path<String>) -> Result<Json<NotaDetalleDto>, ServiceError> {
    let uuid =
        Uuid::parse_str(&id).map_err(|_| ServiceError::validation("ID inválido"))?;
    let detalle = a005_nota_venta::service::get_detalle(uuid).await?;
    Ok(Json(detalle))
}

/// POST /api/nota_venta
pub async fn upsert(
    Json(dto): Json<NotaVentaDto>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if dto.id.is_some() {
        a005_nota_venta::service::update(dto).await?;
        Uuid::nil().to_string()
    } else {
        a005_nota_venta::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/nota_venta/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, ServiceError> {
    let uuid =
        Uuid::parse_str(&id).map_err(|_| ServiceError::validation("ID inválido"))?;
    let deleted = a005_nota_venta::service::delete(uuid).await?;
    if !deleted {
        return Err(ServiceError::not_found("Nota de venta no encontrada"));
    }
    Ok(Json(json!({"success": true})))
}
