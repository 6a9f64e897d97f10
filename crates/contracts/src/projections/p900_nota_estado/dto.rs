use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{EstadoCredito, EstadoEntrega, EstadoPago};

/// Renglón del listado de notas con sus estados derivados
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotaResumenDto {
    pub id: String,
    pub folio: String,
    pub fecha: NaiveDate,
    pub cliente_ref: String,
    pub cliente_nombre: String,

    pub total: f64,
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

/// Filtros del listado. Los valores vacíos u omitidos no se incluyen en la
/// consulta. Los estados viajan como código de la vista (`pagado`,
/// `completa`, `vencido`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NotaFiltros {
    #[serde(default)]
    pub fecha_desde: Option<NaiveDate>,
    #[serde(default)]
    pub fecha_hasta: Option<NaiveDate>,
    #[serde(default)]
    pub cliente_ref: Option<String>,
    #[serde(default)]
    pub estado_pago: Option<String>,
    #[serde(default)]
    pub estado_entrega: Option<String>,
    #[serde(default)]
    pub estado_credito: Option<String>,
}

/// Petición del listado paginado (query string plana, estilo offset/limit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotaListRequest {
    #[serde(default)]
    pub fecha_desde: Option<NaiveDate>,
    #[serde(default)]
    pub fecha_hasta: Option<NaiveDate>,
    #[serde(default)]
    pub cliente_ref: Option<String>,
    #[serde(default)]
    pub estado_pago: Option<String>,
    #[serde(default)]
    pub estado_entrega: Option<String>,
    #[serde(default)]
    pub estado_credito: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotaListResponse {
    pub items: Vec<NotaResumenDto>,
    pub total_count: i64,
    pub has_more: bool,
}
