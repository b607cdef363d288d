use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "biggest-loser contest backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Register a new competitor
    Add {
        name: String,
        /// Starting weight in kg
        #[arg(short, long)]
        baseline: f64,
        /// Supporter or team label
        #[arg(short, long, default_value = "")]
        cheerer: String,
        /// Profile picture reference (URL or free-form)
        #[arg(long, default_value = "")]
        profile_pic: String,
    },
    /// Rename a competitor or change their cheerer
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        cheerer: Option<String>,
    },
    /// Delete a competitor with their weigh-ins and image
    Remove { name: String },
    /// Manage a competitor's weigh-in history
    Weighin {
        #[clap(subcommand)]
        action: WeighinCommand,
    },
    /// Set a photo reference slot
    Photo {
        name: String,
        #[arg(value_enum)]
        slot: PhotoSlotArg,
        reference: String,
    },
    /// Store a local image file as a competitor's profile picture
    Upload { name: String, file: PathBuf },
    /// Show the leaderboard
    Board {
        /// Apply the final-mode weight adjustment
        #[arg(long = "final")]
        final_mode: bool,
        /// Include raw first/latest weights per competitor
        #[arg(long)]
        show_weights: bool,
    },
    /// Present the ranking card by card, winner last
    Reveal {
        /// Apply the final-mode weight adjustment
        #[arg(long = "final")]
        final_mode: bool,
        /// Seconds between reveals (0 for no pauses)
        #[arg(long, default_value_t = 3)]
        pause: u64,
    },
    /// Export all contest data as JSON
    Export {
        /// Target file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all contest data from a JSON export
    Import { input: PathBuf },
    /// Show storage usage
    Info,
    /// Delete all contest data
    Clear {
        /// Required confirmation
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum WeighinCommand {
    /// Record a weigh-in
    Add {
        name: String,
        date: NaiveDate,
        weight: f64,
    },
    /// Rewrite a recorded weigh-in
    Edit {
        name: String,
        /// Date of the entry to rewrite
        date: NaiveDate,
        /// New date (kept when omitted)
        #[arg(long)]
        new_date: Option<NaiveDate>,
        /// New weight in kg
        #[arg(long)]
        weight: f64,
    },
    /// Remove a recorded weigh-in
    Delete {
        name: String,
        date: NaiveDate,
        /// Pin an exact weight when one day holds several entries
        #[arg(long)]
        weight: Option<f64>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSlotArg {
    Profile,
    Before,
    After,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighin_add_parses_date_and_weight() {
        let cli = Cli::try_parse_from([
            "biggest_loser_ranking",
            "weighin",
            "add",
            "Sarah Chen",
            "2025-01-01",
            "85.0",
        ])
        .unwrap();

        let Command::Weighin { action: WeighinCommand::Add { name, date, weight } } = cli.command
        else {
            panic!("expected weighin add");
        };
        assert_eq!(name, "Sarah Chen");
        assert_eq!(date, "2025-01-01".parse().unwrap());
        assert_eq!(weight, 85.0);
    }

    #[test]
    fn board_accepts_the_final_flag() {
        let cli =
            Cli::try_parse_from(["biggest_loser_ranking", "board", "--final"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Board { final_mode: true, show_weights: false }
        );
    }
}
