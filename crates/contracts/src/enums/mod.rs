mod estado;

pub use estado::{EstadoCredito, EstadoEntrega, EstadoPago};
