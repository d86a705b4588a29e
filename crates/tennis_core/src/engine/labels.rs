//! Point labels for the scoreboard game column.

use super::score::Pair;

const CALLS: [&str; 5] = ["0", "15", "30", "40", "AD"];

/// Regular games read 0/15/30/40/AD, with "-" opposite an advantage.
/// Tiebreaks show raw counts.
pub fn point_labels(score: Pair, tiebreak: bool) -> [String; 2] {
    if tiebreak {
        return score.map(|points| points.to_string());
    }
    let call = |points: u32| CALLS.get(points as usize).copied().unwrap_or("?");
    match score {
        [4, _] => [call(4).to_string(), "-".to_string()],
        [_, 4] => ["-".to_string(), call(4).to_string()],
        [a, b] => [call(a).to_string(), call(b).to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_calls() {
        assert_eq!(point_labels([0, 0], false), ["0", "0"]);
        assert_eq!(point_labels([1, 2], false), ["15", "30"]);
        assert_eq!(point_labels([3, 3], false), ["40", "40"]);
        assert_eq!(point_labels([4, 3], false), ["AD", "-"]);
        assert_eq!(point_labels([3, 4], false), ["-", "AD"]);
    }

    #[test]
    fn test_tiebreak_counts() {
        assert_eq!(point_labels([6, 5], true), ["6", "5"]);
        assert_eq!(point_labels([11, 12], true), ["11", "12"]);
    }
}
