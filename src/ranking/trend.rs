use crate::domain::WeighIn;

use super::types::WeightTrend;

/// Classifies the weight direction between the earliest and latest
/// weigh-in. `sorted` must already be ordered by date; an empty or
/// single-entry series reads as unchanged.
pub fn classify(sorted: &[WeighIn], threshold: f64) -> WeightTrend {
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return WeightTrend::Same;
    };

    let change = last.weight - first.weight;
    if change.abs() < threshold {
        WeightTrend::Same
    } else if change > 0.0 {
        WeightTrend::Up
    } else {
        WeightTrend::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(weights: &[f64]) -> Vec<WeighIn> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| WeighIn {
                date: NaiveDate::from_ymd_opt(2025, 1, (i + 1) as u32).unwrap(),
                weight,
            })
            .collect()
    }

    #[test]
    fn change_below_threshold_reads_as_same() {
        assert_eq!(classify(&series(&[90.0, 90.05]), 0.1), WeightTrend::Same);
    }

    #[test]
    fn gained_weight_reads_as_up() {
        assert_eq!(classify(&series(&[90.0, 91.2]), 0.1), WeightTrend::Up);
    }

    #[test]
    fn lost_weight_reads_as_down() {
        assert_eq!(classify(&series(&[91.2, 90.0]), 0.1), WeightTrend::Down);
    }

    #[test]
    fn empty_series_reads_as_same() {
        assert_eq!(classify(&[], 0.1), WeightTrend::Same);
    }
}
