use chrono::Utc;
use contracts::domain::a005_nota_venta::aggregate::{Pago, PagoDto};
use uuid::Uuid;

use super::repository;
use crate::domain::a005_nota_venta;
use crate::projections::p900_nota_estado::projection_builder;
use crate::shared::error::ServiceError;
use crate::shared::format;

/// Medio centavo de tolerancia en comparaciones de importes
const TOLERANCIA_MONTO: f64 = 0.005;

/// El abono no puede rebasar el saldo pendiente de la nota. `excluir`
/// descuenta el pago que se está editando del total ya abonado.
async fn validar_tope(
    nota_ref: &str,
    monto: f64,
    excluir: Option<&str>,
) -> Result<Uuid, ServiceError> {
    let nota_id = Uuid::parse_str(nota_ref)
        .map_err(|_| ServiceError::validation("Referencia de nota inválida"))?;
    let nota = a005_nota_venta::repository::get_by_id(nota_id)
        .await?
        .filter(|n| !n.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found("Nota de venta no encontrada"))?;

    let pagos = repository::list_by_nota(nota_ref).await?;
    let pagado: f64 = pagos
        .iter()
        .filter(|p| excluir != Some(p.id.as_str()))
        .map(|p| p.monto)
        .sum();
    let saldo = nota.total - pagado;

    if monto > saldo + TOLERANCIA_MONTO {
        return Err(ServiceError::business_rule(format!(
            "El pago excede el saldo pendiente de la nota: saldo {}, capturado {}",
            format::format_moneda(saldo),
            format::format_moneda(monto)
        )));
    }

    Ok(nota_id)
}

pub async fn create(dto: PagoDto) -> Result<String, ServiceError> {
    if dto.monto <= 0.0 {
        return Err(ServiceError::validation(
            "El monto del pago debe ser mayor que cero",
        ));
    }

    let nota_id = validar_tope(&dto.nota_ref, dto.monto, None).await?;

    let now = Utc::now();
    let pago = Pago {
        id: Uuid::new_v4().to_string(),
        nota_ref: dto.nota_ref,
        fecha: dto.fecha,
        monto: dto.monto,
        metodo: dto.metodo.unwrap_or_default(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    repository::insert(&pago).await?;
    projection_builder::rebuild_nota(nota_id).await?;
    Ok(pago.id)
}

pub async fn update(dto: PagoDto) -> Result<(), ServiceError> {
    let id = dto
        .id
        .clone()
        .ok_or_else(|| ServiceError::validation("ID inválido"))?;

    let mut pago = repository::get_by_id(&id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pago no encontrado"))?;

    if dto.monto <= 0.0 {
        return Err(ServiceError::validation(
            "El monto del pago debe ser mayor que cero",
        ));
    }

    let nota_id = validar_tope(&pago.nota_ref, dto.monto, Some(&id)).await?;

    pago.fecha = dto.fecha;
    pago.monto = dto.monto;
    pago.metodo = dto.metodo.unwrap_or_default();
    pago.updated_at = Some(Utc::now());

    repository::update(&pago).await?;
    projection_builder::rebuild_nota(nota_id).await?;
    Ok(())
}

pub async fn delete(id: &str) -> Result<bool, ServiceError> {
    let Some(pago) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    let deleted = repository::delete(id).await?;

    if let Ok(nota_id) = Uuid::parse_str(&pago.nota_ref) {
        projection_builder::rebuild_nota(nota_id).await?;
    }
    Ok(deleted)
}
