use serde::{Deserialize, Serialize};
use std::fmt;

/// Above this a score reads as positive (exclusive).
pub const POSITIVE_ABOVE: f64 = 0.5;
/// Below this a score reads as negative (exclusive).
pub const NEGATIVE_BELOW: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// `score > 0.5` positive, `score < 0` negative, `[0, 0.5]` neutral.
    /// NaN falls through to neutral.
    pub fn classify(score: f64) -> Self {
        if score > POSITIVE_ABOVE {
            SentimentLabel::Positive
        } else if score < NEGATIVE_BELOW {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-decimal score text, e.g. `0.75`, `-0.30`.
///
/// Ties round away from zero (`0.125` -> `0.13`). The sign comes from the
/// input, so `-0.0` prints `0.00` while `-0.001` prints `-0.00`.
pub fn format_score(score: f64) -> String {
    let sign = if score < 0.0 { "-" } else { "" };
    let magnitude = (score.abs() * 100.0).round() / 100.0;
    format!("{sign}{magnitude:.2}")
}

/// Two-decimal score text with an explicit `+` for non-negative values.
pub fn format_signed_score(score: f64) -> String {
    if score >= 0.0 {
        format!("+{}", format_score(score))
    } else {
        format_score(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(SentimentLabel::classify(0.5), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(0.50001), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(0.49999), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(0.0001), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(-0.0001), SentimentLabel::Negative);
    }

    #[test]
    fn extremes_and_nan() {
        assert_eq!(SentimentLabel::classify(1.0), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(-1.0), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify(f64::NAN), SentimentLabel::Neutral);
    }

    #[test]
    fn label_text() {
        assert_eq!(SentimentLabel::Positive.to_string(), "Positive");
        assert_eq!(SentimentLabel::Negative.as_str(), "Negative");
        assert_eq!(
            serde_json::to_string(&SentimentLabel::Neutral).unwrap(),
            "\"Neutral\""
        );
    }

    #[test]
    fn score_text() {
        assert_eq!(format_score(0.75), "0.75");
        assert_eq!(format_score(-0.3), "-0.30");
        assert_eq!(format_signed_score(0.18), "+0.18");
        assert_eq!(format_signed_score(0.0), "+0.00");
        assert_eq!(format_signed_score(-0.126), "-0.13");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_score(0.125), "0.13");
        assert_eq!(format_score(-0.125), "-0.13");
        assert_eq!(format_score(0.625), "0.63");
        assert_eq!(format_signed_score(0.125), "+0.13");
        assert_eq!(format_signed_score(-0.125), "-0.13");
    }

    #[test]
    fn negative_zero_prints_unsigned() {
        assert_eq!(format_score(-0.0), "0.00");
        assert_eq!(format_signed_score(-0.0), "+0.00");
        assert_eq!(format_score(-0.001), "-0.00");
    }
}
