pub mod a001_cliente;
pub mod a002_vendedor;
pub mod a003_producto;
pub mod a004_proveedor;
pub mod a005_nota_venta;
pub mod a006_pedido;
pub mod a007_entrega;
pub mod a008_pago;
