use crate::domain::WeighIn;

/// Selects which weight adjustment runs before the loss computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    PreFinal,
    Final,
}

/// Direction of a competitor's weight across their recorded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTrend {
    Up,   // gained
    Down, // lost
    Same,
}

impl WeightTrend {
    pub fn as_str(&self) -> &str {
        match self {
            WeightTrend::Up => "up",
            WeightTrend::Down => "down",
            WeightTrend::Same => "same",
        }
    }
}

/// Signed loss metrics. Positive values denote weight lost, negative
/// denote weight gained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loss {
    pub percent: f64,
    pub kilograms: f64,
}

/// Where a competitor landed. Unranked competitors carry no rank
/// number; the accessors below expose `-1` for display code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Ranked { rank: u32, tied: bool },
    Unranked,
}

/// Derived, read-only output of the ranking engine. Computed fresh on
/// every invocation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
    pub name: String,
    pub cheerer: String,
    pub profile_pic: String,
    pub before_photo: Option<String>,
    pub after_photo: Option<String>,
    /// The weigh-in series the metrics were derived from, sorted by date.
    pub weigh_ins: Vec<WeighIn>,
    /// `None` when the competitor had too few weigh-ins to rank.
    pub loss: Option<Loss>,
    pub placement: Placement,
    pub trend: WeightTrend,
    pub wa_applied: bool,
}

impl RankingResult {
    pub fn has_insufficient_data(&self) -> bool {
        self.loss.is_none()
    }

    /// 1-based rank, or -1 when unranked.
    pub fn rank(&self) -> i32 {
        match self.placement {
            Placement::Ranked { rank, .. } => rank as i32,
            Placement::Unranked => -1,
        }
    }

    pub fn is_tied(&self) -> bool {
        matches!(self.placement, Placement::Ranked { tied: true, .. })
    }

    /// Signed percent loss, or the -1.0 sentinel when unranked.
    pub fn percent_loss(&self) -> f64 {
        self.loss.map(|l| l.percent).unwrap_or(-1.0)
    }

    /// Signed kg loss, or the -1.0 sentinel when unranked.
    pub fn kg_loss(&self) -> f64 {
        self.loss.map(|l| l.kilograms).unwrap_or(-1.0)
    }
}
