use crate::domain::common::{AggregateId, BaseAggregate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotaVentaId(pub Uuid);

impl NotaVentaId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for NotaVentaId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(NotaVentaId::new)
            .map_err(|e| format!("UUID inválido: {}", e))
    }
}

// ============================================================================
// Documento
// ============================================================================

/// Nota de venta (factura). `code` es el folio. Los importes llegan ya
/// calculados por la capa de captura; aquí sólo se validan rangos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotaVenta {
    #[serde(flatten)]
    pub base: BaseAggregate<NotaVentaId>,

    pub cliente_ref: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub subtotal: f64,
    /// Descuento en porcentaje sobre el subtotal
    #[serde(default)]
    pub descuento: f64,
    /// IVA en importe
    #[serde(default)]
    pub iva: f64,
    pub total: f64,
}

impl NotaVenta {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        folio: String,
        cliente_ref: String,
        fecha: NaiveDate,
        subtotal: f64,
        descuento: f64,
        iva: f64,
        total: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(NotaVentaId::new_v4(), folio.clone(), folio);
        base.comment = comment;

        Self {
            base,
            cliente_ref,
            fecha,
            subtotal,
            descuento,
            iva,
            total,
        }
    }

    pub fn update(&mut self, dto: &NotaVentaDto) {
        if let Some(folio) = &dto.folio {
            self.base.code = folio.clone();
            self.base.description = folio.clone();
        }
        self.base.comment = dto.comment.clone();
        self.cliente_ref = dto.cliente_ref.clone();
        self.fecha = dto.fecha;
        self.subtotal = dto.subtotal.unwrap_or(0.0);
        self.descuento = dto.descuento.unwrap_or(0.0);
        self.iva = dto.iva.unwrap_or(0.0);
        self.total = dto.total;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("El folio no puede estar vacío".into());
        }
        if self.cliente_ref.trim().is_empty() {
            return Err("La nota debe tener cliente".into());
        }
        if self.total < 0.0 {
            return Err("El total no puede ser negativo".into());
        }
        if !(0.0..=100.0).contains(&self.descuento) {
            return Err("El descuento debe estar entre 0 y 100".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

// ============================================================================
// Renglones (tablas propias, CRUD independiente)
// ============================================================================

/// Partida de producto dentro de una nota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pedido {
    pub id: String,
    pub nota_ref: String,
    pub producto_ref: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Pedido {
    pub fn importe(&self) -> f64 {
        self.cantidad * self.precio_unitario
    }
}

/// Entrega parcial o total contra una partida
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entrega {
    pub id: String,
    pub pedido_ref: String,
    pub cantidad: f64,
    pub fecha_entrega: NaiveDate,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Abono contra el saldo de una nota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pago {
    pub id: String,
    pub nota_ref: String,
    pub fecha: NaiveDate,
    pub monto: f64,
    /// efectivo / transferencia / cheque / tarjeta
    #[serde(default)]
    pub metodo: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============================================================================
// DTOs de captura
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotaVentaDto {
    pub id: Option<String>,
    pub folio: Option<String>,
    pub cliente_ref: String,
    #[serde(default)]
    pub fecha: NaiveDate,
    pub subtotal: Option<f64>,
    pub descuento: Option<f64>,
    pub iva: Option<f64>,
    pub total: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PedidoDto {
    pub id: Option<String>,
    pub nota_ref: String,
    pub producto_ref: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EntregaDto {
    pub id: Option<String>,
    pub pedido_ref: String,
    pub cantidad: f64,
    #[serde(default)]
    pub fecha_entrega: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PagoDto {
    pub id: Option<String>,
    pub nota_ref: String,
    #[serde(default)]
    pub fecha: NaiveDate,
    pub monto: f64,
    pub metodo: Option<String>,
}
