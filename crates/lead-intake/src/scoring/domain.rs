use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Purchase horizon selected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Timeline {
    Immediate,
    OneToThreeMonths,
    ThreeToSixMonths,
    SixPlusMonths,
    /// Anything outside the four known phrases, including an empty answer.
    Unrecognized,
}

impl Timeline {
    pub const KNOWN: [Timeline; 4] = [
        Timeline::Immediate,
        Timeline::OneToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::SixPlusMonths,
    ];

    /// Exact, case-insensitive match against the form's phrases.
    pub fn from_label(value: &str) -> Self {
        let normalized = value.to_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|timeline| timeline.label() == normalized)
            .unwrap_or(Timeline::Unrecognized)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Immediate => "immediate",
            Timeline::OneToThreeMonths => "1-3 months",
            Timeline::ThreeToSixMonths => "3-6 months",
            Timeline::SixPlusMonths => "6+ months",
            Timeline::Unrecognized => "",
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeline::Unrecognized => f.write_str("unspecified"),
            known => f.write_str(known.label()),
        }
    }
}

impl From<String> for Timeline {
    fn from(value: String) -> Self {
        Timeline::from_label(&value)
    }
}

impl From<Timeline> for String {
    fn from(value: Timeline) -> Self {
        value.label().to_string()
    }
}

/// Questionnaire answers consumed by the classifier. Built once per form
/// submission after the raw payload has been coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub budget: f64,
    pub timeline: Timeline,
    pub company_size: i64,
    #[serde(default)]
    pub pain_points: BTreeSet<String>,
    #[serde(default)]
    pub automation_needs: BTreeSet<String>,
    #[serde(default)]
    pub pain_points_text: String,
    #[serde(default)]
    pub automation_needs_text: String,
}

impl LeadSubmission {
    /// Selected pain points plus selected automation needs.
    pub fn total_items(&self) -> usize {
        self.pain_points.len() + self.automation_needs.len()
    }
}

impl Default for LeadSubmission {
    fn default() -> Self {
        Self {
            budget: 0.0,
            timeline: Timeline::Unrecognized,
            company_size: 0,
            pain_points: BTreeSet::new(),
            automation_needs: BTreeSet::new(),
            pain_points_text: String::new(),
            automation_needs_text: String::new(),
        }
    }
}
