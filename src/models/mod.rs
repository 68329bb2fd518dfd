pub mod campaign;
pub mod quote;
