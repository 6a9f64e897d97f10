use chrono::Utc;
use contracts::domain::a005_nota_venta::aggregate::{NotaVenta, NotaVentaDto};
use contracts::domain::a005_nota_venta::dto::{
    ClienteResumenDto, EntregaDetalleDto, NotaDetalleDto, PagoDetalleDto, PedidoDetalleDto,
};
use contracts::domain::a005_nota_venta::estado::{
    self, derivar_entrega_por_cantidad, PartidaEntrega,
};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

use super::repository;
use crate::domain::{a001_cliente, a002_vendedor, a003_producto, a006_pedido, a007_entrega, a008_pago};
use crate::projections::p900_nota_estado::projection_builder;
use crate::shared::error::ServiceError;
use crate::shared::format;

pub async fn create(dto: NotaVentaDto) -> Result<Uuid, ServiceError> {
    let folio = dto
        .folio
        .clone()
        .unwrap_or_else(|| format!("NV-{}", Uuid::new_v4()));
    let mut aggregate = NotaVenta::new_for_insert(
        folio,
        dto.cliente_ref.clone(),
        dto.fecha,
        dto.subtotal.unwrap_or(0.0),
        dto.descuento.unwrap_or(0.0),
        dto.iva.unwrap_or(0.0),
        dto.total,
        dto.comment.clone(),
    );

    aggregate.validate().map_err(ServiceError::Validation)?;

    // el cliente debe existir: de él salen los días de crédito
    let cliente_id = Uuid::parse_str(&aggregate.cliente_ref)
        .map_err(|_| ServiceError::validation("Referencia de cliente inválida"))?;
    a001_cliente::repository::get_by_id(cliente_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Cliente no encontrado"))?;

    aggregate.base.description = format!(
        "Nota {} del {}",
        aggregate.base.code,
        format::format_fecha(aggregate.fecha)
    );
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    projection_builder::rebuild_nota(id).await?;
    Ok(id)
}

pub async fn update(dto: NotaVentaDto) -> Result<(), ServiceError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::validation("ID inválido"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Nota de venta no encontrada"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    let cliente_id = Uuid::parse_str(&aggregate.cliente_ref)
        .map_err(|_| ServiceError::validation("Referencia de cliente inválida"))?;
    a001_cliente::repository::get_by_id(cliente_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Cliente no encontrado"))?;

    aggregate.base.description = format!(
        "Nota {} del {}",
        aggregate.base.code,
        format::format_fecha(aggregate.fecha)
    );
    aggregate.before_write();

    repository::update(&aggregate).await?;
    projection_builder::rebuild_nota(id).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<bool, ServiceError> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        projection_builder::remove_nota(id).await?;
    }
    Ok(deleted)
}

/// Vista de detalle: nota completa con pedidos→entregas, pagos y el bloque
/// de estados. Aquí la completitud de entrega se mide por CANTIDAD
/// (entregado / pedido), a diferencia del listado que cuenta partidas.
pub async fn get_detalle(id: Uuid) -> Result<NotaDetalleDto, ServiceError> {
    let nota = repository::get_by_id(id)
        .await?
        .filter(|n| !n.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found("Nota de venta no encontrada"))?;

    let nota_id = nota.base.id.as_string();

    // cliente y su vendedor
    let cliente_id = Uuid::parse_str(&nota.cliente_ref)
        .map_err(|_| ServiceError::validation("Referencia de cliente inválida"))?;
    let cliente = a001_cliente::repository::get_by_id(cliente_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Cliente no encontrado"))?;

    let vendedor_nombre = match &cliente.vendedor_ref {
        Some(vref) => match Uuid::parse_str(vref) {
            Ok(vid) => a002_vendedor::repository::get_by_id(vid)
                .await?
                .map(|v| v.base.description),
            Err(_) => None,
        },
        None => None,
    };

    // pedidos con sus entregas y el producto de cada partida
    let pedidos = a006_pedido::repository::list_by_nota(&nota_id).await?;
    let pedido_ids: Vec<String> = pedidos.iter().map(|p| p.id.clone()).collect();
    let entregas = a007_entrega::repository::list_by_pedidos(&pedido_ids).await?;
    let producto_ids: Vec<String> = pedidos.iter().map(|p| p.producto_ref.clone()).collect();
    let productos = a003_producto::repository::get_many_by_ids(&producto_ids).await?;
    let producto_map: std::collections::HashMap<String, (String, String)> = productos
        .into_iter()
        .map(|p| {
            (
                p.base.id.as_string(),
                (p.base.description.clone(), p.presentacion.clone()),
            )
        })
        .collect();

    let pagos = a008_pago::repository::list_by_nota(&nota_id).await?;

    let mut pedidos_dto = Vec::with_capacity(pedidos.len());
    let mut partidas = Vec::with_capacity(pedidos.len());

    for pedido in &pedidos {
        let propias: Vec<_> = entregas
            .iter()
            .filter(|e| e.pedido_ref == pedido.id)
            .collect();
        let cantidad_entregada: f64 = propias.iter().map(|e| e.cantidad).sum();
        let porcentaje_entregado = if pedido.cantidad == 0.0 {
            0.0
        } else {
            (cantidad_entregada / pedido.cantidad * 100.0).clamp(0.0, 100.0)
        };

        partidas.push(PartidaEntrega {
            cantidad: pedido.cantidad,
            cantidad_entregada,
            num_entregas: propias.len(),
        });

        let (producto_nombre, presentacion) = producto_map
            .get(&pedido.producto_ref)
            .cloned()
            .unwrap_or_default();

        pedidos_dto.push(PedidoDetalleDto {
            id: pedido.id.clone(),
            producto_ref: pedido.producto_ref.clone(),
            producto_nombre,
            presentacion,
            cantidad: pedido.cantidad,
            precio_unitario: pedido.precio_unitario,
            importe: pedido.importe(),
            cantidad_entregada,
            porcentaje_entregado,
            entregas: propias
                .iter()
                .map(|e| EntregaDetalleDto {
                    id: e.id.clone(),
                    cantidad: e.cantidad,
                    fecha_entrega: e.fecha_entrega,
                })
                .collect(),
        });
    }

    let montos: Vec<f64> = pagos.iter().map(|p| p.monto).collect();
    let hoy = Utc::now().date_naive();
    let mut estado_nota = estado::derivar_estado_nota(
        nota.total,
        &montos,
        &partidas,
        cliente.dias_credito,
        nota.fecha,
        hoy,
    );

    // variante de detalle: entregado / pedido por cantidades
    let (porcentaje_entrega, estado_entrega) = derivar_entrega_por_cantidad(&partidas);
    estado_nota.porcentaje_entrega = porcentaje_entrega;
    estado_nota.estado_entrega = estado_entrega;

    Ok(NotaDetalleDto {
        id: nota_id,
        folio: nota.base.code.clone(),
        fecha: nota.fecha,
        comment: nota.base.comment.clone(),
        cliente: ClienteResumenDto {
            id: cliente.base.id.as_string(),
            nombre: cliente.base.description.clone(),
            contacto: cliente.contacto.clone(),
            dias_credito: cliente.dias_credito,
            vendedor_nombre,
        },
        subtotal: nota.subtotal,
        descuento: nota.descuento,
        iva: nota.iva,
        total: nota.total,
        pedidos: pedidos_dto,
        pagos: pagos
            .into_iter()
            .map(|p| PagoDetalleDto {
                id: p.id,
                fecha: p.fecha,
                monto: p.monto,
                metodo: p.metodo,
            })
            .collect(),
        estado: estado_nota,
    })
}
