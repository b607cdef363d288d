use colored::Colorize;

use crate::ranking::RankingResult;

use super::format::{format_kg, format_percent, medal_emoji, rank_badge};

/// One leaderboard line per result, in the order the engine returned
/// them (rank order, unranked at the tail).
pub fn lines(results: &[RankingResult], show_weights: bool) -> Vec<String> {
    results
        .iter()
        .map(|result| format_line(result, show_weights))
        .collect()
}

pub fn render(results: &[RankingResult], show_weights: bool) {
    for line in lines(results, show_weights) {
        println!("{line}");
    }
}

fn format_line(result: &RankingResult, show_weights: bool) -> String {
    let badge = rank_badge(result.rank());
    let emoji = match medal_emoji(result.rank()) {
        "" => badge.emoji.clone(),
        medal => medal.to_string(),
    };

    let mut line = format!(
        "{emoji} {:<5} {:<24} {:<24} {}",
        badge.label,
        result.name,
        result.cheerer,
        progress_column(result)
    );

    if result.is_tied() {
        line.push_str(&format!(" {}", "(tied)".yellow()));
    }
    if show_weights {
        line.push_str(&weights_column(result));
    }
    if let Some(weigh_in) = result.weigh_ins.last() {
        line.push_str(&format!("  last weigh-in {}", weigh_in.date));
    }
    if result.wa_applied {
        line.push_str(&format!(" {}", "[anti-dehydration applied]".cyan()));
    }

    line
}

fn progress_column(result: &RankingResult) -> String {
    let Some(loss) = result.loss else {
        return "N/A (needs two weigh-ins)".dimmed().to_string();
    };

    let percent = format_percent(loss.percent.abs());
    let kilos = format_kg(loss.kilograms.abs());
    if loss.percent >= 0.0 {
        format!("{} ({kilos})", format!("\u{2193} {percent}").green().bold())
    } else {
        format!("{} ({kilos})", format!("\u{2191} {percent}").red().bold())
    }
}

fn weights_column(result: &RankingResult) -> String {
    let (Some(first), Some(last)) = (result.weigh_ins.first(), result.weigh_ins.last()) else {
        return String::new();
    };
    format!("  {} \u{2192} {}", format_kg(first.weight), format_kg(last.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RankingSettings;
    use crate::domain::{CompetitorEntry, WeighIn};
    use crate::ranking::{compute_rankings, Mode};

    fn results() -> Vec<RankingResult> {
        colored::control::set_override(false);
        let entries = vec![
            CompetitorEntry {
                name: "Sarah Chen".to_string(),
                baseline_weight: 85.0,
                current_weight: 78.03,
                cheerer: "Team Thunder".to_string(),
                profile_pic: String::new(),
                before_photo: None,
                after_photo: None,
                weigh_ins: vec![
                    WeighIn { date: "2025-01-01".parse().unwrap(), weight: 85.0 },
                    WeighIn { date: "2025-02-15".parse().unwrap(), weight: 78.03 },
                ],
                wa_applied: None,
            },
            CompetitorEntry {
                name: "New Joiner".to_string(),
                baseline_weight: 90.0,
                current_weight: 90.0,
                cheerer: String::new(),
                profile_pic: String::new(),
                before_photo: None,
                after_photo: None,
                weigh_ins: vec![],
                wa_applied: None,
            },
        ];
        compute_rankings(&entries, Mode::PreFinal, &RankingSettings::default())
    }

    #[test]
    fn ranked_line_shows_loss_arrow_and_last_date() {
        let lines = lines(&results(), false);
        assert!(lines[0].contains("Sarah Chen"));
        assert!(lines[0].contains("\u{2193} 8.20%"));
        assert!(lines[0].contains("last weigh-in 2025-02-15"));
    }

    #[test]
    fn insufficient_data_line_shows_not_applicable() {
        let lines = lines(&results(), false);
        assert!(lines[1].contains("New Joiner"));
        assert!(lines[1].contains("N/A"));
    }

    #[test]
    fn weights_column_appears_on_request() {
        let lines = lines(&results(), true);
        assert!(lines[0].contains("85.0kg \u{2192} 78.0kg"));
    }
}
