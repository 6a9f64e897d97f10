use chrono::Utc;
use contracts::domain::a005_nota_venta::aggregate::{Entrega, EntregaDto};
use uuid::Uuid;

use super::repository;
use crate::domain::a006_pedido;
use crate::projections::p900_nota_estado::projection_builder;
use crate::shared::error::ServiceError;

const TOLERANCIA_CANTIDAD: f64 = 1e-6;

/// La entrega no puede rebasar el remanente del pedido. `excluir` permite
/// recalcular el remanente sin contar la entrega que se está editando.
async fn validar_remanente(
    pedido_ref: &str,
    cantidad: f64,
    excluir: Option<&str>,
) -> Result<Uuid, ServiceError> {
    let pedido = a006_pedido::repository::get_by_id(pedido_ref)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pedido no encontrado"))?;

    let entregas = repository::list_by_pedido(pedido_ref).await?;
    let entregado: f64 = entregas
        .iter()
        .filter(|e| excluir != Some(e.id.as_str()))
        .map(|e| e.cantidad)
        .sum();
    let remanente = pedido.cantidad - entregado;

    if cantidad > remanente + TOLERANCIA_CANTIDAD {
        return Err(ServiceError::business_rule(format!(
            "La entrega excede la cantidad pendiente del pedido: pendiente {}, capturado {}",
            remanente, cantidad
        )));
    }

    Uuid::parse_str(&pedido.nota_ref)
        .map_err(|_| ServiceError::validation("Referencia de nota inválida"))
}

pub async fn create(dto: EntregaDto) -> Result<String, ServiceError> {
    if dto.cantidad <= 0.0 {
        return Err(ServiceError::validation(
            "La cantidad entregada debe ser mayor que cero",
        ));
    }

    let nota_id = validar_remanente(&dto.pedido_ref, dto.cantidad, None).await?;

    let now = Utc::now();
    let entrega = Entrega {
        id: Uuid::new_v4().to_string(),
        pedido_ref: dto.pedido_ref,
        cantidad: dto.cantidad,
        fecha_entrega: dto.fecha_entrega,
        created_at: Some(now),
        updated_at: Some(now),
    };

    repository::insert(&entrega).await?;
    projection_builder::rebuild_nota(nota_id).await?;
    Ok(entrega.id)
}

pub async fn update(dto: EntregaDto) -> Result<(), ServiceError> {
    let id = dto
        .id
        .clone()
        .ok_or_else(|| ServiceError::validation("ID inválido"))?;

    let mut entrega = repository::get_by_id(&id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Entrega no encontrada"))?;

    if dto.cantidad <= 0.0 {
        return Err(ServiceError::validation(
            "La cantidad entregada debe ser mayor que cero",
        ));
    }

    let nota_id = validar_remanente(&entrega.pedido_ref, dto.cantidad, Some(&id)).await?;

    entrega.cantidad = dto.cantidad;
    entrega.fecha_entrega = dto.fecha_entrega;
    entrega.updated_at = Some(Utc::now());

    repository::update(&entrega).await?;
    projection_builder::rebuild_nota(nota_id).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool, ServiceError> {
    let Some(entrega) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    let deleted = repository::delete(id).await?;

    if let Some(pedido) = a006_pedido::repository::get_by_id(&entrega.pedido_ref).await? {
        if let Ok(nota_id) = Uuid::parse_str(&pedido.nota_ref) {
            projection_builder::rebuild_nota(nota_id).await?;
        }
    }
    Ok(deleted)
}
