//! Listado de notas en dos fases: (1) ids + conteo filtrando sobre la
//! proyección, (2) carga de los agregados de la ventana y re-derivación de
//! estados en proceso para la respuesta.

use chrono::Utc;
use std::collections::HashMap;

use contracts::domain::a005_nota_venta::estado::{derivar_estado_nota, PartidaEntrega};
use contracts::domain::common::AggregateId;
use contracts::enums::{EstadoCredito, EstadoEntrega, EstadoPago};
use contracts::projections::p900_nota_estado::{NotaListRequest, NotaListResponse, NotaResumenDto};

use super::repository::{self, FiltrosNota};
use crate::domain::{a001_cliente, a005_nota_venta, a006_pedido, a007_entrega, a008_pago};
use crate::shared::error::ServiceError;

/// Traduce los filtros crudos de la petición a su forma tipada; un código
/// de estado desconocido es error de validación, los vacíos se descartan.
fn parsear_filtros(req: &NotaListRequest) -> Result<FiltrosNota, ServiceError> {
    fn parse<T>(
        valor: &Option<String>,
        nombre: &str,
        from_code: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, ServiceError> {
        match valor.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => from_code(code).map(Some).ok_or_else(|| {
                ServiceError::validation(format!("Valor de {} desconocido: {}", nombre, code))
            }),
        }
    }

    Ok(FiltrosNota {
        fecha_desde: req.fecha_desde,
        fecha_hasta: req.fecha_hasta,
        cliente_ref: req
            .cliente_ref
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        estado_pago: parse(&req.estado_pago, "estado_pago", EstadoPago::from_code)?,
        estado_entrega: parse(
            &req.estado_entrega,
            "estado_entrega",
            EstadoEntrega::from_code,
        )?,
        estado_credito: parse(
            &req.estado_credito,
            "estado_credito",
            EstadoCredito::from_code,
        )?,
    })
}

pub async fn listar(req: NotaListRequest) -> Result<NotaListResponse, ServiceError> {
    let filtros = parsear_filtros(&req)?;

    // fase 1: ids + conteo sobre la proyección
    let (ids, total_count) = repository::filtrar_ids(&filtros, req.limit, req.offset).await?;

    // fase 2: agregados vivos de la ventana
    let items = cargar_resumenes(&ids).await?;

    let has_more = total_count > (req.offset as i64 + items.len() as i64);

    Ok(NotaListResponse {
        items,
        total_count,
        has_more,
    })
}

/// Carga las notas indicadas con sus renglones y deriva los estados,
/// conservando el orden de `ids` (el de la fase 1).
async fn cargar_resumenes(ids: &[String]) -> Result<Vec<NotaResumenDto>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let notas = a005_nota_venta::repository::get_many_by_ids(ids).await?;
    let pedidos = a006_pedido::repository::list_by_notas(ids).await?;
    let pedido_ids: Vec<String> = pedidos.iter().map(|p| p.id.clone()).collect();
    let entregas = a007_entrega::repository::list_by_pedidos(&pedido_ids).await?;
    let pagos = a008_pago::repository::list_by_notas(ids).await?;

    let cliente_ids: Vec<String> = notas.iter().map(|n| n.cliente_ref.clone()).collect();
    let clientes = a001_cliente::repository::get_many_by_ids(&cliente_ids).await?;
    let cliente_map: HashMap<String, (String, i64)> = clientes
        .into_iter()
        .map(|c| {
            (
                c.base.id.as_string(),
                (c.base.description.clone(), c.dias_credito),
            )
        })
        .collect();

    let mut entregas_por_pedido: HashMap<&str, (f64, usize)> = HashMap::new();
    for entrega in &entregas {
        let acumulado = entregas_por_pedido
            .entry(entrega.pedido_ref.as_str())
            .or_insert((0.0, 0));
        acumulado.0 += entrega.cantidad;
        acumulado.1 += 1;
    }

    let hoy = Utc::now().date_naive();
    let mut por_id: HashMap<String, NotaResumenDto> = HashMap::new();

    for nota in notas {
        let nota_id = nota.base.id.as_string();

        let partidas: Vec<PartidaEntrega> = pedidos
            .iter()
            .filter(|p| p.nota_ref == nota_id)
            .map(|p| {
                let (cantidad_entregada, num_entregas) = entregas_por_pedido
                    .get(p.id.as_str())
                    .copied()
                    .unwrap_or((0.0, 0));
                PartidaEntrega {
                    cantidad: p.cantidad,
                    cantidad_entregada,
                    num_entregas,
                }
            })
            .collect();
        let montos: Vec<f64> = pagos
            .iter()
            .filter(|p| p.nota_ref == nota_id)
            .map(|p| p.monto)
            .collect();

        let (cliente_nombre, dias_credito) = cliente_map
            .get(&nota.cliente_ref)
            .cloned()
            .unwrap_or_default();

        let estado = derivar_estado_nota(
            nota.total,
            &montos,
            &partidas,
            dias_credito,
            nota.fecha,
            hoy,
        );

        por_id.insert(
            nota_id.clone(),
            NotaResumenDto {
                id: nota_id,
                folio: nota.base.code.clone(),
                fecha: nota.fecha,
                cliente_ref: nota.cliente_ref.clone(),
                cliente_nombre,
                total: nota.total,
                total_pagado: estado.total_pagado,
                saldo: estado.saldo,
                porcentaje_pagado: estado.porcentaje_pagado,
                estado_pago: estado.estado_pago,
                partidas_total: estado.partidas_total,
                partidas_entregadas: estado.partidas_entregadas,
                porcentaje_entrega: estado.porcentaje_entrega,
                estado_entrega: estado.estado_entrega,
                fecha_vencimiento: estado.fecha_vencimiento,
                dias_restantes: estado.dias_restantes,
                porcentaje_credito: estado.porcentaje_credito,
                estado_credito: estado.estado_credito,
            },
        );
    }

    Ok(ids.iter().filter_map(|id| por_id.remove(id)).collect())
}
