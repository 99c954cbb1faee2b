pub mod db;
pub mod models;
pub mod qdrant;
pub mod queries;
pub mod schema;
pub mod search;
pub mod settings;
pub mod tasks;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
