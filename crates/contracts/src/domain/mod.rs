pub mod common;

pub mod a001_cliente;
pub mod a002_vendedor;
pub mod a003_producto;
pub mod a004_proveedor;
pub mod a005_nota_venta;
