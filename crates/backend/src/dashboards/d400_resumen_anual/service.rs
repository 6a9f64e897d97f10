//! Resumen anual: misma derivación por nota que el listado (variante de
//! entrega por partidas), pero sólo conserva contadores. Hace su propia
//! lectura en dos fases sobre la ventana del año, independiente de la
//! paginación del listado.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::HashMap;

use contracts::dashboards::d400_resumen_anual::{
    DesempenoVendedoresResponse, ResumenAnualResponse, VendedorResumenDto,
};
use contracts::domain::a005_nota_venta::estado::{derivar_estado_nota, EstadoNota, PartidaEntrega};
use contracts::domain::common::AggregateId;
use contracts::enums::{EstadoEntrega, EstadoPago};

use super::repository;
use crate::domain::{a001_cliente, a005_nota_venta, a006_pedido, a007_entrega, a008_pago};

#[derive(Debug, Default, PartialEq)]
struct Contadores {
    total: i64,
    pagadas: i64,
    entregadas: i64,
    vencidas: i64,
}

/// Reduce los estados derivados a los cuatro contadores del tablero
fn reducir(estados: &[EstadoNota]) -> Contadores {
    let mut contadores = Contadores {
        total: estados.len() as i64,
        ..Default::default()
    };
    for estado in estados {
        if estado.estado_pago == EstadoPago::Pagado {
            contadores.pagadas += 1;
        }
        if estado.estado_entrega == EstadoEntrega::Completa {
            contadores.entregadas += 1;
        }
        if estado.dias_restantes <= 0 {
            contadores.vencidas += 1;
        }
    }
    contadores
}

pub async fn get_resumen_anual(anio: Option<i32>) -> Result<ResumenAnualResponse> {
    let anio = anio.unwrap_or_else(|| Utc::now().year());
    let desde = NaiveDate::from_ymd_opt(anio, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("año inválido: {}", anio))?;
    let hasta = NaiveDate::from_ymd_opt(anio, 12, 31)
        .ok_or_else(|| anyhow::anyhow!("año inválido: {}", anio))?;

    // fase 1: ids de la ventana del año
    let ids = a005_nota_venta::repository::list_ids_by_date_range(desde, hasta).await?;

    // fase 2: agregados y derivación por nota
    let estados = derivar_estados(&ids).await?;
    let contadores = reducir(&estados);

    Ok(ResumenAnualResponse {
        anio,
        total_notas: contadores.total,
        notas_pagadas: contadores.pagadas,
        notas_entregadas: contadores.entregadas,
        credito_vencido: contadores.vencidas,
    })
}

async fn derivar_estados(ids: &[String]) -> Result<Vec<EstadoNota>> {
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
    let credito_map: HashMap<String, i64> = clientes
        .into_iter()
        .map(|c| (c.base.id.as_string(), c.dias_credito))
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
    let mut estados = Vec::with_capacity(notas.len());

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

        let dias_credito = credito_map.get(&nota.cliente_ref).copied().unwrap_or(0);

        estados.push(derivar_estado_nota(
            nota.total,
            &montos,
            &partidas,
            dias_credito,
            nota.fecha,
            hoy,
        ));
    }

    Ok(estados)
}

pub async fn get_desempeno_vendedores(anio: Option<i32>) -> Result<DesempenoVendedoresResponse> {
    let anio = anio.unwrap_or_else(|| Utc::now().year());
    let date_from = format!("{:04}-01-01", anio);
    let date_to = format!("{:04}-12-31", anio);

    let filas = repository::get_desempeno_por_vendedor(&date_from, &date_to).await?;

    let vendedores = filas
        .into_iter()
        .map(|f| VendedorResumenDto {
            vendedor_ref: f.vendedor_ref,
            vendedor_nombre: f.vendedor_nombre,
            num_notas: f.num_notas,
            total_vendido: f.total_vendido,
            total_cobrado: f.total_cobrado,
            saldo_pendiente: f.total_vendido - f.total_cobrado,
        })
        .collect();

    Ok(DesempenoVendedoresResponse { anio, vendedores })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, dd: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dd).unwrap()
    }

    fn estado(total: f64, pagado: f64, partidas: &[PartidaEntrega], hoy_offset: i64) -> EstadoNota {
        // nota con 30 días de crédito fechada `hoy_offset` días atrás
        let hoy = d(2026, 6, 15);
        let fecha = hoy - chrono::Duration::days(hoy_offset);
        derivar_estado_nota(total, &[pagado], partidas, 30, fecha, hoy)
    }

    #[test]
    fn test_reducir_vacio() {
        let contadores = reducir(&[]);
        assert_eq!(contadores, Contadores::default());
    }

    #[test]
    fn test_reducir_contadores() {
        let entregada = [PartidaEntrega {
            cantidad: 10.0,
            cantidad_entregada: 10.0,
            num_entregas: 1,
        }];
        let sin_entregar = [PartidaEntrega {
            cantidad: 10.0,
            cantidad_entregada: 0.0,
            num_entregas: 0,
        }];

        let estados = vec![
            // pagada, entregada, vigente
            estado(1000.0, 1000.0, &entregada, 0),
            // parcial, sin entregar, vigente
            estado(1000.0, 400.0, &sin_entregar, 0),
            // pendiente, sin entregar, crédito vencido (fechada hace 45 días)
            estado(1000.0, 0.0, &sin_entregar, 45),
        ];

        let contadores = reducir(&estados);
        assert_eq!(contadores.total, 3);
        assert_eq!(contadores.pagadas, 1);
        assert_eq!(contadores.entregadas, 1);
        assert_eq!(contadores.vencidas, 1);
    }

    #[test]
    fn test_reducir_entrega_cuenta_partidas_no_cantidades() {
        // ambas partidas tienen renglón de entrega aunque una entregó cero:
        // para el tablero la nota cuenta como entregada
        let partidas = [
            PartidaEntrega {
                cantidad: 10.0,
                cantidad_entregada: 10.0,
                num_entregas: 1,
            },
            PartidaEntrega {
                cantidad: 5.0,
                cantidad_entregada: 0.0,
                num_entregas: 1,
            },
        ];
        let estados = vec![estado(100.0, 0.0, &partidas, 0)];
        assert_eq!(reducir(&estados).entregadas, 1);
    }
}
