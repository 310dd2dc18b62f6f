pub mod error;
pub mod routes;
pub mod service;

pub use routes::routes;
pub use service::Service;
