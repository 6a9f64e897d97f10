pub mod d400_resumen_anual;
