use std::cmp::Ordering;

use log::debug;

use crate::config::settings::RankingSettings;
use crate::domain::CompetitorEntry;

use super::trend;
use super::types::{Loss, Mode, Placement, RankingResult};

/// Ranks competitors by signed percent change between their first and
/// most recent weigh-in.
///
/// Pure function: owns no state, performs no I/O, and yields identical
/// output for identical input. Competitors with fewer than
/// `settings.min_weigh_ins` recorded weigh-ins are returned unranked,
/// after every ranked competitor, ordered among themselves by name.
pub fn compute_rankings(
    entries: &[CompetitorEntry],
    mode: Mode,
    settings: &RankingSettings,
) -> Vec<RankingResult> {
    let mut results: Vec<RankingResult> = entries
        .iter()
        .map(|entry| evaluate_entry(entry, mode, settings))
        .collect();

    sort_for_placement(&mut results);
    assign_placements(&mut results, settings.tie_threshold);

    debug!(
        "ranking order: {:?}",
        results
            .iter()
            .map(|r| (r.name.as_str(), r.rank()))
            .collect::<Vec<_>>()
    );

    results
}

fn evaluate_entry(
    entry: &CompetitorEntry,
    mode: Mode,
    settings: &RankingSettings,
) -> RankingResult {
    let sorted = entry.sorted_weigh_ins();
    let sufficient = sorted.len() >= settings.min_weigh_ins;

    // Nominal current weight is only a fallback; with a usable series the
    // latest weigh-in wins.
    let raw_current = sorted
        .last()
        .map(|w| w.weight)
        .unwrap_or(entry.current_weight);

    let (current, wa_applied) = match mode {
        Mode::PreFinal => (raw_current, entry.wa_applied.unwrap_or(false)),
        Mode::Final => {
            let adjusted = (mode.adjustment())(raw_current);
            (adjusted, adjusted != raw_current)
        }
    };

    let loss = if sufficient {
        let baseline = sorted[0].weight;
        let loss = Loss {
            percent: (baseline - current) / baseline * 100.0,
            kilograms: baseline - current,
        };
        debug!(
            "{}: baseline={:.1}kg current={:.1}kg loss={:.2}% ({:.1}kg)",
            entry.name, baseline, current, loss.percent, loss.kilograms
        );
        Some(loss)
    } else {
        None
    };

    let trend = trend::classify(&sorted, settings.trend_threshold);

    RankingResult {
        name: entry.name.clone(),
        cheerer: entry.cheerer.clone(),
        profile_pic: entry.profile_pic.clone(),
        before_photo: entry.before_photo.clone(),
        after_photo: entry.after_photo.clone(),
        weigh_ins: sorted,
        loss,
        placement: Placement::Unranked,
        trend,
        wa_applied,
    }
}

/// Ranked entries first by percent loss descending, unranked entries last
/// ordered by name.
fn sort_for_placement(results: &mut [RankingResult]) {
    results.sort_by(|a, b| match (&a.loss, &b.loss) {
        (None, None) => a.name.cmp(&b.name),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_loss), Some(b_loss)) => b_loss
            .percent
            .partial_cmp(&a_loss.percent)
            .unwrap_or(Ordering::Equal),
    });
}

/// Competition ranking over the sorted slice: rank = position + 1, with
/// adjacent entries closer than `tie_threshold` percent sharing the
/// earlier rank. Chains propagate, so three entries within threshold of
/// their neighbors all share one rank. Unranked entries sit at the tail
/// and keep `Placement::Unranked`.
fn assign_placements(results: &mut [RankingResult], tie_threshold: f64) {
    for i in 0..results.len() {
        let Some(loss) = results[i].loss else {
            break;
        };

        let mut rank = (i + 1) as u32;
        let mut tied = false;

        if i > 0 {
            if let (Some(prev_loss), Placement::Ranked { rank: prev_rank, .. }) =
                (results[i - 1].loss, results[i - 1].placement)
            {
                if (loss.percent - prev_loss.percent).abs() < tie_threshold {
                    rank = prev_rank;
                    tied = true;
                    results[i - 1].placement = Placement::Ranked {
                        rank: prev_rank,
                        tied: true,
                    };
                }
            }
        }

        results[i].placement = Placement::Ranked { rank, tied };
    }
}
