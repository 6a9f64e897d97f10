use axum::{extract::Path, Json};
use serde_json::json;

use contracts::domain::a005_nota_venta::aggregate::PagoDto;

use crate::domain::a008_pago;
use crate::shared::error::ServiceError;

/// POST /api/pago: alta o edición, valida el tope contra el saldo
pub async fn upsert(Json(dto): Json<PagoDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if dto.id.is_some() {
        a008_pago::service::update(dto).await?;
        uuid::Uuid::nil().to_string()
    } else {
        a008_pago::service::create(dto).await?
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/pago/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, ServiceError> {
    let deleted = a008_pago::service::delete(&id).await?;
    if !deleted {
        return Err(ServiceError::not_found("Pago no encontrado"));
    }
    Ok(Json(json!({"success": true})))
}
