//! Priority level for improvement actions.

use serde::{Deserialize, Serialize};

/// Priority level for a report recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Returns the display label for this priority.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Maps a benchmark attainment score (0.0 to 1.0) to a priority.
    ///
    /// Scores are bucketed on a 0-100 scale: up to 30 is critical, up to
    /// 50 high, up to 70 medium, anything better is low.
    pub fn from_score(score: f64) -> Self {
        let percent = (score.clamp(0.0, 1.0) * 100.0).round() as u8;
        match percent {
            0..=30 => Priority::Critical,
            31..=50 => Priority::High,
            51..=70 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_score_critical() {
        assert_eq!(Priority::from_score(0.0), Priority::Critical);
        assert_eq!(Priority::from_score(0.30), Priority::Critical);
    }

    #[test]
    fn from_score_high() {
        assert_eq!(Priority::from_score(0.31), Priority::High);
        assert_eq!(Priority::from_score(0.50), Priority::High);
    }

    #[test]
    fn from_score_medium() {
        assert_eq!(Priority::from_score(0.51), Priority::Medium);
        assert_eq!(Priority::from_score(0.70), Priority::Medium);
    }

    #[test]
    fn from_score_low() {
        assert_eq!(Priority::from_score(0.71), Priority::Low);
        assert_eq!(Priority::from_score(1.0), Priority::Low);
    }

    #[test]
    fn from_score_clamps_out_of_range() {
        assert_eq!(Priority::from_score(-3.0), Priority::Critical);
        assert_eq!(Priority::from_score(f64::NAN), Priority::Critical);
        assert_eq!(Priority::from_score(7.0), Priority::Low);
    }

    #[test]
    fn priorities_order_most_urgent_first() {
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }
}
