pub mod dto;

pub use dto::{NotaFiltros, NotaListRequest, NotaListResponse, NotaResumenDto};
