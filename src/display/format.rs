/// Badge shown next to a ranked competitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankBadge {
    pub emoji: String,
    pub label: String,
}

pub fn rank_badge(rank: i32) -> RankBadge {
    let emoji = match rank {
        1 => "1\u{fe0f}\u{20e3}",
        2 => "2\u{fe0f}\u{20e3}",
        3 => "3\u{fe0f}\u{20e3}",
        4 => "4\u{fe0f}\u{20e3}",
        5 => "5\u{fe0f}\u{20e3}",
        6 => "6\u{fe0f}\u{20e3}",
        7 => "7\u{fe0f}\u{20e3}",
        8 => "8\u{fe0f}\u{20e3}",
        9 => "9\u{fe0f}\u{20e3}",
        10 => "\u{1f51f}",
        _ => return unranked_or_large(rank),
    };

    RankBadge {
        emoji: emoji.to_string(),
        label: ordinal(rank as u32),
    }
}

fn unranked_or_large(rank: i32) -> RankBadge {
    if rank < 1 {
        return RankBadge {
            emoji: "\u{2753}".to_string(),
            label: "N/A".to_string(),
        };
    }
    RankBadge {
        emoji: rank.to_string(),
        label: ordinal(rank as u32),
    }
}

/// Medal for podium places, plain ordinal otherwise.
pub fn medal_emoji(rank: i32) -> &'static str {
    match rank {
        1 => "\u{1f947}",
        2 => "\u{1f948}",
        3 => "\u{1f949}",
        _ => "",
    }
}

pub fn ordinal(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_kg(value: f64) -> String {
    format!("{value:.1}kg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podium_ranks_get_keycap_badges() {
        assert_eq!(rank_badge(1).label, "1st");
        assert_eq!(rank_badge(2).label, "2nd");
        assert_eq!(rank_badge(3).label, "3rd");
        assert_eq!(rank_badge(10).emoji, "\u{1f51f}");
    }

    #[test]
    fn large_ranks_fall_back_to_plain_numbers() {
        let badge = rank_badge(15);
        assert_eq!(badge.emoji, "15");
        assert_eq!(badge.label, "15th");
    }

    #[test]
    fn unranked_shows_not_applicable() {
        assert_eq!(rank_badge(-1).label, "N/A");
    }

    #[test]
    fn teen_ordinals_use_th() {
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(111), "111th");
    }

    #[test]
    fn percent_renders_with_two_decimals() {
        assert_eq!(format_percent(8.0), "8.00%");
        assert_eq!(format_percent(10.046), "10.05%");
    }
}
