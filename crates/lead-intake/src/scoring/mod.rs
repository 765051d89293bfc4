//! Rule-based lead classifier.
//!
//! Four independent factors (budget, timeline, company size, engagement depth)
//! are looked up in fixed tier tables and summed; the total maps onto a
//! hot/warm/cold category. Nothing here performs I/O or holds state.

mod category;
mod domain;
pub mod factors;
pub mod tiers;

pub use category::{LeadCategory, UnknownCategory, CATEGORY_TIERS};
pub use domain::{LeadSubmission, Timeline};

use serde::{Deserialize, Serialize};

/// Independent contributor to the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadFactor {
    Budget,
    Timeline,
    CompanySize,
    Engagement,
}

/// Points awarded for one factor, kept for dashboard audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: LeadFactor,
    pub points: u16,
    pub notes: String,
}

/// Classifier output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub score: u16,
    pub category: LeadCategory,
    pub components: Vec<FactorScore>,
}

impl LeadScore {
    pub fn points_for(&self, factor: LeadFactor) -> Option<u16> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.points)
    }
}

/// Score a questionnaire response. Total over every `LeadSubmission`.
pub fn classify(submission: &LeadSubmission) -> LeadScore {
    let components = factors::score_factors(submission);
    let score = components.iter().map(|component| component.points).sum();

    LeadScore {
        score,
        category: LeadCategory::from_score(score),
        components,
    }
}
