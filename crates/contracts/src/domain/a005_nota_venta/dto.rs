//! DTOs de la vista de detalle de una nota de venta.
//!
//! El bloque `estado` de la vista de detalle usa la variante de entrega
//! por cantidad; el porcentaje por partida de cada pedido también.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::estado::EstadoNota;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClienteResumenDto {
    pub id: String,
    pub nombre: String,
    pub contacto: String,
    pub dias_credito: i64,
    pub vendedor_nombre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntregaDetalleDto {
    pub id: String,
    pub cantidad: f64,
    pub fecha_entrega: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedidoDetalleDto {
    pub id: String,
    pub producto_ref: String,
    pub producto_nombre: String,
    pub presentacion: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub importe: f64,
    pub cantidad_entregada: f64,
    /// Entregado / pedido de esta partida, acotado a [0, 100]
    pub porcentaje_entregado: f64,
    pub entregas: Vec<EntregaDetalleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagoDetalleDto {
    pub id: String,
    pub fecha: NaiveDate,
    pub monto: f64,
    pub metodo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotaDetalleDto {
    pub id: String,
    pub folio: String,
    pub fecha: NaiveDate,
    pub comment: Option<String>,

    pub cliente: ClienteResumenDto,

    pub subtotal: f64,
    pub descuento: f64,
    pub iva: f64,
    pub total: f64,

    pub pedidos: Vec<PedidoDetalleDto>,
    pub pagos: Vec<PagoDetalleDto>,

    pub estado: EstadoNota,
}
