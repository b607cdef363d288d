use colored::Colorize;

use crate::ranking::RankingResult;

use super::format::{format_kg, format_percent, medal_emoji, ordinal};

const RULE: &str =
    "\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}";

/// One reveal card for a ranked competitor.
pub fn card(result: &RankingResult, position: usize, total: usize) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    let rank = result.rank();
    let place = if rank == 1 {
        format!("\u{1f451} {}", "WINNER!".yellow().bold())
    } else {
        format!("{} {} PLACE", medal_emoji(rank), ordinal(rank as u32))
            .trim_start()
            .to_string()
    };
    lines.push(format!("  {place}"));
    lines.push(format!("  {}", result.name.bold()));

    if !result.cheerer.is_empty() {
        lines.push(format!("  Cheered by: {}", result.cheerer));
    }

    if let Some(loss) = result.loss {
        let label = if loss.percent >= 0.0 { "Weight Loss" } else { "Weight Gain" };
        let percent = format_percent(loss.percent.abs());
        let colored_percent = if loss.percent >= 0.0 {
            percent.green().bold()
        } else {
            percent.red().bold()
        };
        lines.push(format!(
            "  {label}: {colored_percent} ({})",
            format_kg(loss.kilograms.abs())
        ));
    }

    if let (Some(first), Some(last)) = (result.weigh_ins.first(), result.weigh_ins.last()) {
        lines.push(format!(
            "  {} \u{2192} {}",
            format_kg(first.weight),
            format_kg(last.weight)
        ));
    }

    if result.wa_applied {
        lines.push("  Anti-dehydration applied".cyan().to_string());
    }

    lines.push(format!("  [{position}/{total}]"));
    lines.push(RULE.to_string());
    lines
}

pub fn finale() -> Vec<String> {
    vec![
        "\u{1f389} \u{1f38a} \u{1f389} \u{1f38a} \u{1f389}".to_string(),
        "Congratulations to all participants!"
            .yellow()
            .bold()
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeighIn;
    use crate::ranking::{Loss, Placement, WeightTrend};

    fn ranked_result(name: &str, rank: u32, percent: f64) -> RankingResult {
        colored::control::set_override(false);
        RankingResult {
            name: name.to_string(),
            cheerer: "Dream Team".to_string(),
            profile_pic: String::new(),
            before_photo: None,
            after_photo: None,
            weigh_ins: vec![
                WeighIn { date: "2025-01-01".parse().unwrap(), weight: 100.0 },
                WeighIn { date: "2025-02-01".parse().unwrap(), weight: 100.0 - percent },
            ],
            loss: Some(Loss { percent, kilograms: percent }),
            placement: Placement::Ranked { rank, tied: false },
            trend: WeightTrend::Down,
            wa_applied: false,
        }
    }

    #[test]
    fn winner_card_says_winner() {
        let lines = card(&ranked_result("Sarah", 1, 8.0), 6, 6);
        assert!(lines.iter().any(|l| l.contains("WINNER!")));
        assert!(lines.iter().any(|l| l.contains("Sarah")));
    }

    #[test]
    fn podium_card_shows_place_and_progress() {
        let lines = card(&ranked_result("Mike", 3, 5.0), 4, 6);
        assert!(lines.iter().any(|l| l.contains("3rd PLACE")));
        assert!(lines.iter().any(|l| l.contains("Weight Loss: 5.00%")));
        assert!(lines.iter().any(|l| l.contains("[4/6]")));
    }

    #[test]
    fn gain_card_flips_the_label() {
        let lines = card(&ranked_result("Alex", 6, -2.0), 1, 6);
        assert!(lines.iter().any(|l| l.contains("Weight Gain: 2.00%")));
    }
}
