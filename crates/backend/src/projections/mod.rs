pub mod p900_nota_estado;
