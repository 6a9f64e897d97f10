use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductoId(pub Uuid);

impl ProductoId {
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

impl AggregateId for ProductoId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductoId::new)
            .map_err(|e| format!("UUID inválido: {}", e))
    }
}

/// Producto terminado (película de celofán / polietileno).
/// `presentacion` describe el formato comercial: ancho, calibre, kilos
/// por rollo, etc. `existencias` es la cantidad en almacén en la unidad
/// de venta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producto {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductoId>,

    #[serde(default)]
    pub presentacion: String,
    /// Unidad de venta (kg, rollo, millar)
    #[serde(default)]
    pub unidad: String,
    #[serde(default)]
    pub precio_lista: f64,
    #[serde(default)]
    pub existencias: f64,
}

impl Producto {
    pub fn new_for_insert(
        code: String,
        description: String,
        presentacion: String,
        unidad: String,
        precio_lista: f64,
        existencias: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProductoId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            presentacion,
            unidad,
            precio_lista,
            existencias,
        }
    }

    pub fn update(&mut self, dto: &ProductoDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.presentacion = dto.presentacion.clone().unwrap_or_default();
        self.unidad = dto.unidad.clone().unwrap_or_default();
        self.precio_lista = dto.precio_lista.unwrap_or(0.0);
        self.existencias = dto.existencias.unwrap_or(0.0);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del producto no puede estar vacío".into());
        }
        if self.precio_lista < 0.0 {
            return Err("El precio de lista no puede ser negativo".into());
        }
        if self.existencias < 0.0 {
            return Err("Las existencias no pueden ser negativas".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductoDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub presentacion: Option<String>,
    pub unidad: Option<String>,
    pub precio_lista: Option<f64>,
    pub existencias: Option<f64>,
    pub comment: Option<String>,
}
