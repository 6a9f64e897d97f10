use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Campos comunes a todos los agregados de catálogo y documentos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Identificador único del registro
    pub id: Id,
    /// Código de negocio (por ejemplo "CLI-00012", "NV-2026-0045")
    pub code: String,
    /// Descripción / nombre del registro
    pub description: String,
    /// Comentario libre
    pub comment: Option<String>,
    /// Metadatos de ciclo de vida
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Reconstruir un agregado leído de la base con sus metadatos originales
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
