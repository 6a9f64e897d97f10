use chrono::Utc;
use contracts::domain::a005_nota_venta::aggregate::{Pedido, PedidoDto};
use uuid::Uuid;

use super::repository;
use crate::domain::{a003_producto, a005_nota_venta, a007_entrega};
use crate::projections::p900_nota_estado::projection_builder;
use crate::shared::error::ServiceError;

const TOLERANCIA_CANTIDAD: f64 = 1e-6;

async fn validar_nota(nota_ref: &str) -> Result<Uuid, ServiceError> {
    let nota_id = Uuid::parse_str(nota_ref)
        .map_err(|_| ServiceError::validation("Referencia de nota inválida"))?;
    a005_nota_venta::repository::get_by_id(nota_id)
        .await?
        .filter(|n| !n.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found("Nota de venta no encontrada"))?;
    Ok(nota_id)
}

/// Tope de captura: la cantidad pedida no puede rebasar las existencias
/// del producto al momento de capturar la partida.
async fn validar_existencias(producto_ref: &str, cantidad: f64) -> Result<(), ServiceError> {
    let producto_id = Uuid::parse_str(producto_ref)
        .map_err(|_| ServiceError::validation("Referencia de producto inválida"))?;
    let producto = a003_producto::repository::get_by_id(producto_id)
        .await?
        .filter(|p| !p.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found("Producto no encontrado"))?;

    if cantidad > producto.existencias + TOLERANCIA_CANTIDAD {
        return Err(ServiceError::business_rule(format!(
            "Existencias insuficientes de {}: disponibles {}, solicitadas {}",
            producto.base.description, producto.existencias, cantidad
        )));
    }
    Ok(())
}

pub async fn create(dto: PedidoDto) -> Result<String, ServiceError> {
    if dto.cantidad <= 0.0 {
        return Err(ServiceError::validation(
            "La cantidad debe ser mayor que cero",
        ));
    }
    if dto.precio_unitario < 0.0 {
        return Err(ServiceError::validation(
            "El precio unitario no puede ser negativo",
        ));
    }

    let nota_id = validar_nota(&dto.nota_ref).await?;
    validar_existencias(&dto.producto_ref, dto.cantidad).await?;

    let now = Utc::now();
    let pedido = Pedido {
        id: Uuid::new_v4().to_string(),
        nota_ref: dto.nota_ref,
        producto_ref: dto.producto_ref,
        cantidad: dto.cantidad,
        precio_unitario: dto.precio_unitario,
        created_at: Some(now),
        updated_at: Some(now),
    };

    repository::insert(&pedido).await?;
    projection_builder::rebuild_nota(nota_id).await?;
    Ok(pedido.id)
}

pub async fn update(dto: PedidoDto) -> Result<(), ServiceError> {
    let id = dto
        .id
        .clone()
        .ok_or_else(|| ServiceError::validation("ID inválido"))?;

    let mut pedido = repository::get_by_id(&id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pedido no encontrado"))?;

    if dto.cantidad <= 0.0 {
        return Err(ServiceError::validation(
            "La cantidad debe ser mayor que cero",
        ));
    }
    if dto.precio_unitario < 0.0 {
        return Err(ServiceError::validation(
            "El precio unitario no puede ser negativo",
        ));
    }

    let nota_id = validar_nota(&pedido.nota_ref).await?;
    validar_existencias(&dto.producto_ref, dto.cantidad).await?;

    pedido.producto_ref = dto.producto_ref;
    pedido.cantidad = dto.cantidad;
    pedido.precio_unitario = dto.precio_unitario;
    pedido.updated_at = Some(Utc::now());

    repository::update(&pedido).await?;
    projection_builder::rebuild_nota(nota_id).await?;
    Ok(())
}

/// Borra la partida y sus entregas (no hay cascada en el esquema)
pub async fn delete(id: &str) -> Result<bool, ServiceError> {
    let Some(pedido) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    a007_entrega::repository::delete_by_pedido(id).await?;
    let deleted = repository::delete(id).await?;

    if let Ok(nota_id) = Uuid::parse_str(&pedido.nota_ref) {
        projection_builder::rebuild_nota(nota_id).await?;
    }
    Ok(deleted)
}
