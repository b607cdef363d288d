use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("competitor '{0}' not found")]
    UnknownCompetitor(String),

    #[error("competitor '{0}' already exists")]
    DuplicateCompetitor(String),

    #[error("no weigh-in on {date} for competitor '{name}'")]
    UnknownWeighIn { name: String, date: NaiveDate },

    #[error("image is {size} bytes, exceeds the {max} byte limit")]
    ImageTooLarge { size: usize, max: usize },

    #[error("invalid import payload: {0}")]
    InvalidImport(String),
}
