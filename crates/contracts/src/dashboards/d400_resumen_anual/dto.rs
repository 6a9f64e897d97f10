use serde::{Deserialize, Serialize};

/// Petición de los contadores del año; sin `anio` se usa el año en curso
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResumenAnualRequest {
    #[serde(default)]
    pub anio: Option<i32>,
}

/// Contadores del año calendario sobre las notas de venta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenAnualResponse {
    pub anio: i32,
    pub total_notas: i64,
    /// Notas con porcentaje pagado >= 100
    pub notas_pagadas: i64,
    /// Notas con todas sus partidas con al menos una entrega
    pub notas_entregadas: i64,
    /// Notas con el plazo de crédito agotado
    pub credito_vencido: i64,
}

/// Desglose de desempeño por vendedor para el año
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendedorResumenDto {
    pub vendedor_ref: String,
    pub vendedor_nombre: String,
    pub num_notas: i64,
    pub total_vendido: f64,
    pub total_cobrado: f64,
    pub saldo_pendiente: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesempenoVendedoresResponse {
    pub anio: i32,
    pub vendedores: Vec<VendedorResumenDto>,
}
