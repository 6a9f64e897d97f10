use serde::{Deserialize, Serialize};

/// Metadatos de ciclo de vida de un agregado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Fecha de creación del registro
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Fecha de última actualización
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Borrado lógico (soft delete)
    pub is_deleted: bool,
    /// Documento aplicado (reservado para documentos)
    pub is_posted: bool,
    /// Versión para optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            is_posted: false,
            version: 0,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
