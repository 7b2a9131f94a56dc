pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod ordem_repo;
pub use ordem_repo::OrdemRepository;
