use std::time::Duration;

use anyhow::Result;

use crate::config::settings::AppConfig;
use crate::display;
use crate::ranking::{self, Mode, RankingResult};

use super::roster::RosterService;

/// Presents the ranking as a sequence of cards, worst place first and
/// the winner last, pausing between reveals.
pub struct RevealService {
    roster: RosterService,
    config: AppConfig,
}

impl RevealService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            roster: RosterService::new(config.clone())?,
            config,
        })
    }

    pub fn run(&self, mode: Mode, pause_secs: u64) -> Result<()> {
        let entries = self.roster.entries()?;
        let results = ranking::compute_rankings(&entries, mode, &self.config.ranking);

        let ordered = ordered_for_reveal(&results);
        if ordered.is_empty() {
            println!("No rankings available");
            return Ok(());
        }

        let total = ordered.len();
        for (idx, result) in ordered.iter().enumerate() {
            if idx > 0 && pause_secs > 0 {
                std::thread::sleep(Duration::from_secs(pause_secs));
            }
            for line in display::reveal::card(result, idx + 1, total) {
                println!("{line}");
            }
        }

        for line in display::reveal::finale() {
            println!("{line}");
        }
        Ok(())
    }
}

/// Ranked results only, reordered from last place up to the winner.
fn ordered_for_reveal(results: &[RankingResult]) -> Vec<&RankingResult> {
    let mut ordered: Vec<&RankingResult> = results
        .iter()
        .filter(|r| !r.has_insufficient_data())
        .collect();
    ordered.sort_by_key(|r| std::cmp::Reverse(r.rank()));
    ordered
}
