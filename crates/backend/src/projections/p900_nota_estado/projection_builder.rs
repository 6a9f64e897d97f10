//! Reconstrucción de la fila de estados de una nota.
//!
//! Cada escritura sobre una nota o sus renglones (pedidos, entregas,
//! pagos) vuelve a derivar los estados y reescribe la fila completa.

use anyhow::Result;
use chrono::Utc;
use contracts::domain::a005_nota_venta::estado::{derivar_estado_nota, PartidaEntrega};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

use super::repository::{self, Model};
use crate::domain::{a001_cliente, a005_nota_venta, a006_pedido, a007_entrega, a008_pago};

pub async fn rebuild_nota(nota_id: Uuid) -> Result<()> {
    let nota = match a005_nota_venta::repository::get_by_id(nota_id).await? {
        Some(n) if !n.base.metadata.is_deleted => n,
        // nota borrada o inexistente: la fila desaparece del listado
        _ => {
            repository::delete_by_nota(&nota_id.to_string()).await?;
            return Ok(());
        }
    };

    let nota_ref = nota.base.id.as_string();

    let (cliente_nombre, dias_credito) = match Uuid::parse_str(&nota.cliente_ref) {
        Ok(cid) => a001_cliente::repository::get_by_id(cid)
            .await?
            .map(|c| (c.base.description.clone(), c.dias_credito))
            .unwrap_or_default(),
        Err(_) => (String::new(), 0),
    };

    let pedidos = a006_pedido::repository::list_by_nota(&nota_ref).await?;
    let pedido_ids: Vec<String> = pedidos.iter().map(|p| p.id.clone()).collect();
    let entregas = a007_entrega::repository::list_by_pedidos(&pedido_ids).await?;
    let pagos = a008_pago::repository::list_by_nota(&nota_ref).await?;

    let partidas: Vec<PartidaEntrega> = pedidos
        .iter()
        .map(|pedido| {
            let propias: Vec<_> = entregas
                .iter()
                .filter(|e| e.pedido_ref == pedido.id)
                .collect();
            PartidaEntrega {
                cantidad: pedido.cantidad,
                cantidad_entregada: propias.iter().map(|e| e.cantidad).sum(),
                num_entregas: propias.len(),
            }
        })
        .collect();
    let montos: Vec<f64> = pagos.iter().map(|p| p.monto).collect();

    let estado = derivar_estado_nota(
        nota.total,
        &montos,
        &partidas,
        dias_credito,
        nota.fecha,
        Utc::now().date_naive(),
    );

    let row = Model {
        nota_ref,
        folio: nota.base.code.clone(),
        fecha: nota.fecha,
        cliente_ref: nota.cliente_ref.clone(),
        cliente_nombre,
        total: nota.total,
        total_pagado: estado.total_pagado,
        saldo: estado.saldo,
        porcentaje_pagado: estado.porcentaje_pagado,
        estado_pago: estado.estado_pago.code().to_string(),
        partidas_total: estado.partidas_total as i64,
        partidas_entregadas: estado.partidas_entregadas as i64,
        porcentaje_entrega: estado.porcentaje_entrega,
        estado_entrega: estado.estado_entrega.code().to_string(),
        fecha_vencimiento: estado.fecha_vencimiento,
        dias_credito,
    };

    repository::upsert_row(&row).await
}

pub async fn remove_nota(nota_id: Uuid) -> Result<()> {
    repository::delete_by_nota(&nota_id.to_string()).await?;
    Ok(())
}

/// Reconstruye la proyección completa; regresa cuántas notas se procesaron
pub async fn rebuild_all() -> Result<usize> {
    let ids = a005_nota_venta::repository::list_all_ids().await?;
    let total = ids.len();

    for id in ids {
        if let Ok(uuid) = Uuid::parse_str(&id) {
            rebuild_nota(uuid).await?;
        }
    }

    tracing::info!("p900_nota_estado rebuilt for {} notas", total);
    Ok(total)
}
