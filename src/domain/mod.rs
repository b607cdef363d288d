pub mod models;

pub use models::{CompetitorEntry, WeighIn};
