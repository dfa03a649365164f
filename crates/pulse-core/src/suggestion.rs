//! Rule-based spending suggestions
//!
//! A fixed decision table over a single whole-unit spend total. Rules are
//! checked top to bottom and the first match wins:
//!
//! | total spent | suggestion         |
//! |-------------|--------------------|
//! | `> 50`      | [`Suggestion::HighSpending`]    |
//! | `> 20`      | [`Suggestion::RisingSpending`]  |
//! | otherwise   | [`Suggestion::HealthySpending`] |

use std::fmt;

/// Totals strictly above this get the "spent a lot" suggestion
pub const HIGH_SPEND_THRESHOLD: f64 = 50.0;

/// Totals strictly above this (and not above the high threshold) get the "increasing" suggestion
pub const RISING_SPEND_THRESHOLD: f64 = 20.0;

const HIGH_SPENDING_MESSAGE: &str = "You've spent a lot of WPU recently—consider saving some!";
const RISING_SPENDING_MESSAGE: &str = "Your spending is increasing—keep an eye on your budget!";
const HEALTHY_SPENDING_MESSAGE: &str = "Your spending looks good—keep it up!";

/// One of the three fixed suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suggestion {
    HighSpending,
    RisingSpending,
    HealthySpending,
}

impl Suggestion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suggestion::HighSpending => "high_spending",
            Suggestion::RisingSpending => "rising_spending",
            Suggestion::HealthySpending => "healthy_spending",
        }
    }

    /// The advisory text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::HighSpending => HIGH_SPENDING_MESSAGE,
            Suggestion::RisingSpending => RISING_SPENDING_MESSAGE,
            Suggestion::HealthySpending => HEALTHY_SPENDING_MESSAGE,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Pick the suggestion for a whole-unit spend total
///
/// Both thresholds are strict, so exactly 50 is "increasing" and exactly 20
/// is "looks good". Negative totals (and NaN) fall through to the last rule.
pub fn classify(total_spent: f64) -> Suggestion {
    if total_spent > HIGH_SPEND_THRESHOLD {
        Suggestion::HighSpending
    } else if total_spent > RISING_SPEND_THRESHOLD {
        Suggestion::RisingSpending
    } else {
        Suggestion::HealthySpending
    }
}
