pub mod competitors;
pub mod connection;
pub mod images;
pub mod models;
pub mod setup;
pub mod weigh_ins;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
