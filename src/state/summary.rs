/// End-of-game scoring
use super::data::RoundResult;

/// Feedback tier derived from the final accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// No rounds were played
    NoData,
    Low,
    Mid,
    High,
    /// Every answer correct
    Top,
}

impl Tier {
    /// Pick the tier for a percentage (inclusive lower bounds)
    fn for_percentage(total: usize, percentage: f64) -> Self {
        if total == 0 {
            Tier::NoData
        } else if percentage >= 100.0 {
            Tier::Top
        } else if percentage >= 80.0 {
            Tier::High
        } else if percentage >= 50.0 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    /// Line shown under the score on the result screen
    pub fn feedback(self) -> &'static str {
        match self {
            Tier::NoData => "No data available.",
            Tier::Top => "Master Visionary! You can't be fooled.",
            Tier::High => "Impressive! You have a keen eye for optics.",
            Tier::Mid => "Not bad. But computational photography is getting good.",
            Tier::Low => "The machines are winning. Keep practicing!",
        }
    }
}

/// Final score of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    /// 0.0 to 100.0; 0.0 when no rounds were played
    pub percentage: f64,
    pub tier: Tier,
}

impl Summary {
    /// Percentage rounded for display
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }
}

/// Derive score, accuracy and tier from the round history
pub fn summarize(history: &[RoundResult]) -> Summary {
    let score = history.iter().filter(|r| r.was_correct).count();
    let total = history.len();
    let percentage = if total > 0 {
        score as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    Summary {
        score,
        total,
        percentage,
        tier: Tier::for_percentage(total, percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Side;

    fn history(correct: &[bool]) -> Vec<RoundResult> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &was_correct)| RoundResult {
                pair_id: i as u32 + 1,
                was_correct,
                user_choice: Side::A,
                correct_choice: if was_correct { Side::A } else { Side::B },
            })
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.tier, Tier::NoData);
        assert_eq!(summary.tier.feedback(), "No data available.");
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(summarize(&history(&[true; 5])).tier, Tier::Top);
        assert_eq!(summarize(&history(&[true, true, true, true, false])).tier, Tier::High);
        assert_eq!(summarize(&history(&[true, false])).tier, Tier::Mid);
        assert_eq!(summarize(&history(&[true, false, false])).tier, Tier::Low);
        assert_eq!(summarize(&history(&[false])).tier, Tier::Low);
    }

    #[test]
    fn test_two_of_three() {
        let summary = summarize(&history(&[true, false, true]));
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total, 3);
        assert!((summary.percentage - 66.666).abs() < 0.01);
        assert_eq!(summary.rounded_percentage(), 67);
        assert_eq!(summary.tier, Tier::Mid);
    }
}
