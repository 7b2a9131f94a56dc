pub mod clientes;
pub mod ordens;
