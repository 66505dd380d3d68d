pub mod service;

pub use service::IndexerService;
