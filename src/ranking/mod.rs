pub mod adjustment;
pub mod engine;
pub mod trend;
pub mod types;

pub use engine::compute_rankings;
pub use types::{Loss, Mode, Placement, RankingResult, WeightTrend};
