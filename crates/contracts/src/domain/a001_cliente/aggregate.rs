use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClienteId(pub Uuid);

impl ClienteId {
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

impl AggregateId for ClienteId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ClienteId::new)
            .map_err(|e| format!("UUID inválido: {}", e))
    }
}

// ============================================================================
// Agregado
// ============================================================================

/// Cliente de la empresa. `description` es la razón social; el plazo de
/// crédito en días gobierna la derivación del estado de crédito de sus notas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    #[serde(flatten)]
    pub base: BaseAggregate<ClienteId>,

    /// Persona de contacto
    #[serde(default)]
    pub contacto: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub correo: String,
    /// Días de crédito otorgados
    #[serde(default)]
    pub dias_credito: i64,
    /// Vendedor asignado
    pub vendedor_ref: Option<String>,
}

impl Cliente {
    pub fn new_for_insert(
        code: String,
        description: String,
        contacto: String,
        telefono: String,
        correo: String,
        dias_credito: i64,
        vendedor_ref: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ClienteId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            contacto,
            telefono,
            correo,
            dias_credito,
            vendedor_ref,
        }
    }

    pub fn update(&mut self, dto: &ClienteDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.contacto = dto.contacto.clone().unwrap_or_default();
        self.telefono = dto.telefono.clone().unwrap_or_default();
        self.correo = dto.correo.clone().unwrap_or_default();
        self.dias_credito = dto.dias_credito.unwrap_or(0);
        self.vendedor_ref = dto.vendedor_ref.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("La razón social no puede estar vacía".into());
        }
        if self.dias_credito < 0 {
            return Err("Los días de crédito no pueden ser negativos".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClienteDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub contacto: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub dias_credito: Option<i64>,
    pub vendedor_ref: Option<String>,
    pub comment: Option<String>,
}
