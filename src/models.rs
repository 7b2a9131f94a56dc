pub mod cliente;
pub mod ordem;
