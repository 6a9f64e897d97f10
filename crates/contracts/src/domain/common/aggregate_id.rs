/// Identificador tipado de un agregado.
///
/// Cada agregado define su newtype sobre `Uuid`; el trait da la
/// conversión uniforme hacia/desde la representación TEXT de la base.
pub trait AggregateId: Sized {
    fn as_string(&self) -> String;

    fn from_string(s: &str) -> Result<Self, String>;
}
