pub mod dto;

pub use dto::{
    DesempenoVendedoresResponse, ResumenAnualRequest, ResumenAnualResponse, VendedorResumenDto,
};
