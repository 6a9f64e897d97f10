use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProveedorId(pub Uuid);

impl ProveedorId {
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

impl AggregateId for ProveedorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProveedorId::new)
            .map_err(|e| format!("UUID inválido: {}", e))
    }
}

/// Proveedor de materia prima (resinas, bobinas, tintas)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proveedor {
    #[serde(flatten)]
    pub base: BaseAggregate<ProveedorId>,

    #[serde(default)]
    pub contacto: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub correo: String,
    /// Materiales que surte
    #[serde(default)]
    pub materiales: String,
}

impl Proveedor {
    pub fn new_for_insert(
        code: String,
        description: String,
        contacto: String,
        telefono: String,
        correo: String,
        materiales: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProveedorId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            contacto,
            telefono,
            correo,
            materiales,
        }
    }

    pub fn update(&mut self, dto: &ProveedorDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.contacto = dto.contacto.clone().unwrap_or_default();
        self.telefono = dto.telefono.clone().unwrap_or_default();
        self.correo = dto.correo.clone().unwrap_or_default();
        self.materiales = dto.materiales.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del proveedor no puede estar vacío".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProveedorDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub contacto: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub materiales: Option<String>,
    pub comment: Option<String>,
}
