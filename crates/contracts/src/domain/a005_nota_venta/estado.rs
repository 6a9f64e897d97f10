//! Derivación de estados de una nota de venta.
//!
//! Funciones puras: reciben los importes/renglones ya leídos y la fecha de
//! hoy como parámetro. Los porcentajes siempre quedan dentro de [0, 100]
//! aunque los datos de origen vengan inconsistentes (sobrepago,
//! sobre-entrega).
//!
//! La completitud de entrega tiene dos variantes que NO deben unificarse:
//! el listado y los resúmenes cuentan partidas con al menos una entrega
//! registrada ([`derivar_entrega_por_partidas`]); la vista de detalle
//! compara cantidad entregada contra cantidad pedida
//! ([`derivar_entrega_por_cantidad`]).

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::enums::{EstadoCredito, EstadoEntrega, EstadoPago};

/// Resumen de entregas de una partida, insumo de la derivación
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartidaEntrega {
    /// Cantidad pedida
    pub cantidad: f64,
    /// Suma de las cantidades entregadas
    pub cantidad_entregada: f64,
    /// Número de renglones de entrega registrados
    pub num_entregas: usize,
}

/// Bloque de estados derivados de una nota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstadoNota {
    pub total_pagado: f64,
    pub saldo: f64,
    pub porcentaje_pagado: f64,
    pub estado_pago: EstadoPago,

    pub partidas_total: usize,
    pub partidas_entregadas: usize,
    pub porcentaje_entrega: f64,
    pub estado_entrega: EstadoEntrega,

    pub fecha_vencimiento: NaiveDate,
    pub dias_restantes: i64,
    pub porcentaje_credito: f64,
    pub estado_credito: EstadoCredito,
}

/// Porcentaje pagado, acotado a [0, 100]. Un total en cero produce 0%,
/// nunca NaN.
pub fn porcentaje_pagado(total: f64, total_pagado: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    (total_pagado / total * 100.0).clamp(0.0, 100.0)
}

pub fn clasificar_pago(porcentaje: f64) -> EstadoPago {
    if porcentaje >= 100.0 {
        EstadoPago::Pagado
    } else if porcentaje > 0.0 {
        EstadoPago::Parcial
    } else {
        EstadoPago::Pendiente
    }
}

fn clasificar_entrega(porcentaje: f64) -> EstadoEntrega {
    if porcentaje >= 100.0 {
        EstadoEntrega::Completa
    } else if porcentaje > 0.0 {
        EstadoEntrega::Parcial
    } else {
        EstadoEntrega::Pendiente
    }
}

/// Variante de listado: una partida cuenta como entregada si tiene al menos
/// un renglón de entrega, sin importar cantidades. Regresa
/// `(porcentaje, estado, partidas_entregadas)`.
pub fn derivar_entrega_por_partidas(partidas: &[PartidaEntrega]) -> (f64, EstadoEntrega, usize) {
    let entregadas = partidas.iter().filter(|p| p.num_entregas > 0).count();
    let porcentaje = if partidas.is_empty() {
        0.0
    } else {
        (entregadas as f64 / partidas.len() as f64 * 100.0).clamp(0.0, 100.0)
    };
    (porcentaje, clasificar_entrega(porcentaje), entregadas)
}

/// Variante de detalle: cantidad entregada entre cantidad pedida.
pub fn derivar_entrega_por_cantidad(partidas: &[PartidaEntrega]) -> (f64, EstadoEntrega) {
    let pedida: f64 = partidas.iter().map(|p| p.cantidad).sum();
    let entregada: f64 = partidas.iter().map(|p| p.cantidad_entregada).sum();
    let porcentaje = if pedida == 0.0 {
        0.0
    } else {
        (entregada / pedida * 100.0).clamp(0.0, 100.0)
    };
    (porcentaje, clasificar_entrega(porcentaje))
}

/// Derivación del plazo de crédito contra `hoy`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditoDerivado {
    pub fecha_vencimiento: NaiveDate,
    /// Días que faltan para el vencimiento, nunca negativo
    pub dias_restantes: i64,
    pub porcentaje_credito: f64,
    pub estado_credito: EstadoCredito,
}

pub fn derivar_credito(fecha: NaiveDate, dias_credito: i64, hoy: NaiveDate) -> CreditoDerivado {
    let fecha_vencimiento = fecha + Duration::days(dias_credito);
    let dias_restantes = (fecha_vencimiento - hoy).num_days().max(0);
    let porcentaje_credito = if dias_credito > 0 {
        (dias_restantes as f64 / dias_credito as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };
    let estado_credito = if dias_restantes <= 0 {
        EstadoCredito::Vencido
    } else if dias_restantes <= 7 {
        EstadoCredito::PorVencer
    } else {
        EstadoCredito::Vigente
    };

    CreditoDerivado {
        fecha_vencimiento,
        dias_restantes,
        porcentaje_credito,
        estado_credito,
    }
}

/// Derivación completa de una nota con la variante de entrega por partidas
/// (la que usan el listado, la proyección y los resúmenes anuales).
pub fn derivar_estado_nota(
    total: f64,
    montos_pagos: &[f64],
    partidas: &[PartidaEntrega],
    dias_credito: i64,
    fecha: NaiveDate,
    hoy: NaiveDate,
) -> EstadoNota {
    let total_pagado: f64 = montos_pagos.iter().sum();
    let saldo = total - total_pagado;
    let porcentaje = porcentaje_pagado(total, total_pagado);

    let (porcentaje_entrega, estado_entrega, entregadas) = derivar_entrega_por_partidas(partidas);
    let credito = derivar_credito(fecha, dias_credito, hoy);

    EstadoNota {
        total_pagado,
        saldo,
        porcentaje_pagado: porcentaje,
        estado_pago: clasificar_pago(porcentaje),
        partidas_total: partidas.len(),
        partidas_entregadas: entregadas,
        porcentaje_entrega,
        estado_entrega,
        fecha_vencimiento: credito.fecha_vencimiento,
        dias_restantes: credito.dias_restantes,
        porcentaje_credito: credito.porcentaje_credito,
        estado_credito: credito.estado_credito,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, dd: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dd).unwrap()
    }

    fn partida(cantidad: f64, entregada: f64, num: usize) -> PartidaEntrega {
        PartidaEntrega {
            cantidad,
            cantidad_entregada: entregada,
            num_entregas: num,
        }
    }

    #[test]
    fn test_pago_parcial() {
        // total 1000, pagos [400, 300] => 700 pagado, 70%, parcial
        let e = derivar_estado_nota(1000.0, &[400.0, 300.0], &[], 30, d(2026, 1, 10), d(2026, 1, 20));
        assert_eq!(e.total_pagado, 700.0);
        assert_eq!(e.saldo, 300.0);
        assert_eq!(e.porcentaje_pagado, 70.0);
        assert_eq!(e.estado_pago, EstadoPago::Parcial);
    }

    #[test]
    fn test_total_cero_no_divide() {
        let e = derivar_estado_nota(0.0, &[], &[], 30, d(2026, 1, 10), d(2026, 1, 20));
        assert_eq!(e.porcentaje_pagado, 0.0);
        assert_eq!(e.estado_pago, EstadoPago::Pendiente);
        assert!(e.porcentaje_pagado.is_finite());
    }

    #[test]
    fn test_sobrepago_acotado() {
        let e = derivar_estado_nota(500.0, &[400.0, 300.0], &[], 30, d(2026, 1, 10), d(2026, 1, 20));
        assert_eq!(e.total_pagado, 700.0);
        assert_eq!(e.porcentaje_pagado, 100.0);
        assert_eq!(e.estado_pago, EstadoPago::Pagado);
        // el saldo sí puede quedar negativo; los porcentajes no
        assert_eq!(e.saldo, -200.0);
    }

    #[test]
    fn test_pago_exacto() {
        let e = derivar_estado_nota(1000.0, &[1000.0], &[], 30, d(2026, 1, 10), d(2026, 1, 20));
        assert_eq!(e.porcentaje_pagado, 100.0);
        assert_eq!(e.estado_pago, EstadoPago::Pagado);
    }

    #[test]
    fn test_sin_pagos_pendiente() {
        let e = derivar_estado_nota(1000.0, &[], &[], 30, d(2026, 1, 10), d(2026, 1, 20));
        assert_eq!(e.total_pagado, 0.0);
        assert_eq!(e.estado_pago, EstadoPago::Pendiente);
    }

    #[test]
    fn test_entrega_por_partidas_cuenta_renglones() {
        // dos de tres partidas tienen renglones de entrega, aunque una de
        // ellas entregó cantidad cero
        let partidas = [
            partida(100.0, 100.0, 2),
            partida(50.0, 0.0, 1),
            partida(80.0, 0.0, 0),
        ];
        let (pct, estado, entregadas) = derivar_entrega_por_partidas(&partidas);
        assert_eq!(entregadas, 2);
        assert!((pct - 66.666).abs() < 0.01);
        assert_eq!(estado, EstadoEntrega::Parcial);
    }

    #[test]
    fn test_entrega_por_cantidad_ignora_renglones_vacios() {
        // misma nota, la variante de detalle mide cantidades
        let partidas = [
            partida(100.0, 100.0, 2),
            partida(50.0, 0.0, 1),
            partida(80.0, 0.0, 0),
        ];
        let (pct, estado) = derivar_entrega_por_cantidad(&partidas);
        assert!((pct - 100.0 / 230.0 * 100.0).abs() < 1e-9);
        assert_eq!(estado, EstadoEntrega::Parcial);
    }

    #[test]
    fn test_entrega_completa_en_ambas_variantes() {
        let partidas = [partida(100.0, 100.0, 1), partida(50.0, 50.0, 3)];
        let (pct_p, estado_p, _) = derivar_entrega_por_partidas(&partidas);
        let (pct_c, estado_c) = derivar_entrega_por_cantidad(&partidas);
        assert_eq!(pct_p, 100.0);
        assert_eq!(pct_c, 100.0);
        assert_eq!(estado_p, EstadoEntrega::Completa);
        assert_eq!(estado_c, EstadoEntrega::Completa);
    }

    #[test]
    fn test_sobre_entrega_acotada() {
        let partidas = [partida(100.0, 130.0, 1)];
        let (pct, estado) = derivar_entrega_por_cantidad(&partidas);
        assert_eq!(pct, 100.0);
        assert_eq!(estado, EstadoEntrega::Completa);
    }

    #[test]
    fn test_nota_sin_partidas() {
        let (pct, estado, entregadas) = derivar_entrega_por_partidas(&[]);
        assert_eq!((pct, entregadas), (0.0, 0));
        assert_eq!(estado, EstadoEntrega::Pendiente);
        let (pct, estado) = derivar_entrega_por_cantidad(&[]);
        assert_eq!(pct, 0.0);
        assert_eq!(estado, EstadoEntrega::Pendiente);
    }

    #[test]
    fn test_credito_vencido() {
        // 30 días de crédito, la nota se fechó hace 40 días
        let c = derivar_credito(d(2026, 1, 1), 30, d(2026, 2, 10));
        assert_eq!(c.fecha_vencimiento, d(2026, 1, 31));
        assert_eq!(c.dias_restantes, 0);
        assert_eq!(c.porcentaje_credito, 0.0);
        assert_eq!(c.estado_credito, EstadoCredito::Vencido);
    }

    #[test]
    fn test_credito_vence_hoy() {
        let c = derivar_credito(d(2026, 1, 1), 30, d(2026, 1, 31));
        assert_eq!(c.dias_restantes, 0);
        assert_eq!(c.estado_credito, EstadoCredito::Vencido);
    }

    #[test]
    fn test_credito_por_vencer() {
        let c = derivar_credito(d(2026, 1, 1), 30, d(2026, 1, 26));
        assert_eq!(c.dias_restantes, 5);
        assert_eq!(c.estado_credito, EstadoCredito::PorVencer);
        assert!((c.porcentaje_credito - 5.0 / 30.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_credito_vigente() {
        let c = derivar_credito(d(2026, 1, 1), 30, d(2026, 1, 5));
        assert_eq!(c.dias_restantes, 26);
        assert_eq!(c.estado_credito, EstadoCredito::Vigente);
    }

    #[test]
    fn test_credito_de_contado() {
        // sin días de crédito el porcentaje queda fijo en 100
        let c = derivar_credito(d(2026, 1, 1), 0, d(2026, 3, 1));
        assert_eq!(c.dias_restantes, 0);
        assert_eq!(c.porcentaje_credito, 100.0);
        assert_eq!(c.estado_credito, EstadoCredito::Vencido);
    }

    #[test]
    fn test_dias_restantes_nunca_negativo() {
        let c = derivar_credito(d(2025, 1, 1), 15, d(2026, 6, 1));
        assert_eq!(c.dias_restantes, 0);
        assert_eq!(c.estado_credito, EstadoCredito::Vencido);
    }
}
