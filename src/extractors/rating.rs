//! Rating parsed from the card's free text

use regex::Regex;
use std::sync::LazyLock;

static RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Rating\s*:\s*(\d+(?:\.\d+)?)/10").unwrap());

/// `Rating: 7.5/10` anywhere in the text, clamped to 0..=10. Absent means 0.
pub fn rating(text: &str) -> f64 {
    RATING
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|r| r.clamp(0.0, 10.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_parsed() {
        assert_eq!(rating("IMDB Rating: 7.5/10 (12k votes)"), 7.5);
        assert_eq!(rating("rating : 6.0/10"), 6.0);
        assert_eq!(rating("Rating: 8/10"), 8.0);
    }

    #[test]
    fn test_rating_absent_is_zero() {
        assert_eq!(rating("no score here"), 0.0);
        assert_eq!(rating("Rating: N/A"), 0.0);
    }

    #[test]
    fn test_rating_clamped() {
        assert_eq!(rating("Rating: 42.0/10"), 10.0);
    }
}
