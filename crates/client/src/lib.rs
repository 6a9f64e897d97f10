//! Cliente mecanografiado del backend: transporte HTTP ([`api`]) y el
//! orquestador de paginación del listado de notas ([`loader`]) que una capa
//! de interfaz puede manejar directamente.

pub mod api;
pub mod loader;

pub use api::{ApiError, HttpNotasApi, NotasApi};
pub use loader::{NotasLoader, PAGE_SIZE};
