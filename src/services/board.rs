use anyhow::Result;
use log::info;

use crate::config::settings::AppConfig;
use crate::display;
use crate::ranking::{self, Mode};

use super::roster::RosterService;

/// Loads the roster, runs the ranking engine, and prints the leaderboard.
pub struct BoardService {
    roster: RosterService,
    config: AppConfig,
}

impl BoardService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            roster: RosterService::new(config.clone())?,
            config,
        })
    }

    pub fn run(&self, mode: Mode, show_weights: bool) -> Result<()> {
        let entries = self.roster.entries()?;
        if entries.is_empty() {
            println!("No competitors registered yet");
            return Ok(());
        }

        info!("Ranking {} competitors", entries.len());
        let results = ranking::compute_rankings(&entries, mode, &self.config.ranking);
        display::board::render(&results, show_weights);
        Ok(())
    }
}
