use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{FactorScore, LeadCategory, LeadScore, LeadSubmission};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who to follow up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub industry: String,
}

/// Free-form answers that do not feed the score but travel with the lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadContext {
    pub current_hassles: String,
    pub current_tools: String,
    pub spending_capacity: f64,
}

/// Normalized form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub contact: ContactDetails,
    pub submission: LeadSubmission,
    pub context: LeadContext,
}

/// Classifier output with the identifier and timestamp attached at intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLead {
    pub lead_id: LeadId,
    pub profile: LeadProfile,
    pub score: u16,
    pub category: LeadCategory,
    pub components: Vec<FactorScore>,
    pub created_at: DateTime<Utc>,
}

impl ScoredLead {
    pub fn new(
        lead_id: LeadId,
        profile: LeadProfile,
        result: LeadScore,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            lead_id,
            profile,
            score: result.score,
            category: result.category,
            components: result.components,
            created_at,
        }
    }

    pub fn summary_view(&self) -> LeadSummaryView {
        let contact = &self.profile.contact;
        let submission = &self.profile.submission;
        let context = &self.profile.context;

        LeadSummaryView {
            lead_id: self.lead_id.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            company: contact.company.clone(),
            industry: contact.industry.clone(),
            company_size: submission.company_size,
            score: self.score,
            category: self.category,
            budget: submission.budget,
            timeline: submission.timeline.label().to_string(),
            pain_points_text: submission.pain_points_text.clone(),
            automation_needs_text: submission.automation_needs_text.clone(),
            current_hassles: context.current_hassles.clone(),
            current_tools: context.current_tools.clone(),
            created_at: self.created_at,
        }
    }
}

/// Flattened lead shape used by the dashboard listing and the workflow webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummaryView {
    pub lead_id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub industry: String,
    pub company_size: i64,
    pub score: u16,
    pub category: LeadCategory,
    pub budget: f64,
    pub timeline: String,
    pub pain_points_text: String,
    pub automation_needs_text: String,
    pub current_hassles: String,
    pub current_tools: String,
    pub created_at: DateTime<Utc>,
}
