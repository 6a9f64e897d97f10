use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendedorId(pub Uuid);

impl VendedorId {
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

impl AggregateId for VendedorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(VendedorId::new)
            .map_err(|e| format!("UUID inválido: {}", e))
    }
}

/// Vendedor; agrupa clientes para los resúmenes de desempeño
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendedor {
    #[serde(flatten)]
    pub base: BaseAggregate<VendedorId>,

    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub correo: String,
}

impl Vendedor {
    pub fn new_for_insert(
        code: String,
        description: String,
        telefono: String,
        correo: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(VendedorId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            telefono,
            correo,
        }
    }

    pub fn update(&mut self, dto: &VendedorDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.telefono = dto.telefono.clone().unwrap_or_default();
        self.correo = dto.correo.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del vendedor no puede estar vacío".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VendedorDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub comment: Option<String>,
}
