#[derive(Debug, Clone)]
pub struct RankingSettings {
    /// Adjacent percent-loss gap below which two competitors share a rank.
    pub tie_threshold: f64,
    /// Absolute kg change below which the trend reads as unchanged.
    pub trend_threshold: f64,
    /// Weigh-ins required before a competitor can be ranked.
    pub min_weigh_ins: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            tie_threshold: 0.1,
            trend_threshold: 0.1,
            min_weigh_ins: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub default_database_path: &'static str,
    /// Soft budget for the whole store.
    pub storage_budget_bytes: u64,
    /// Usage percentage past which stored images are evicted before a
    /// new upload is accepted.
    pub image_evict_percentage: u64,
    /// Largest accepted single image upload.
    pub max_image_bytes: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            default_database_path: "biggest_loser.db",
            storage_budget_bytes: 5 * 1024 * 1024,
            image_evict_percentage: 80,
            max_image_bytes: 512 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ranking: RankingSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    pub fn database_path(&self) -> String {
        std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| self.storage.default_database_path.to_string())
    }
}
