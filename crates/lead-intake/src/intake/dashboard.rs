use serde::Serialize;

use super::domain::{LeadSummaryView, ScoredLead};
use crate::scoring::LeadCategory;

/// Headline counters shown above the lead table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total: usize,
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
    pub average_score: u16,
}

impl LeadStats {
    pub fn from_leads(leads: &[ScoredLead]) -> Self {
        let count = |category: LeadCategory| {
            leads
                .iter()
                .filter(|lead| lead.category == category)
                .count()
        };

        let average_score = if leads.is_empty() {
            0
        } else {
            let sum: u64 = leads.iter().map(|lead| u64::from(lead.score)).sum();
            (sum as f64 / leads.len() as f64).round() as u16
        };

        Self {
            total: leads.len(),
            hot: count(LeadCategory::Hot),
            warm: count(LeadCategory::Warm),
            cold: count(LeadCategory::Cold),
            average_score,
        }
    }
}

/// Dashboard payload: the filtered leads and stats computed over that same selection.
#[derive(Debug, Clone, Serialize)]
pub struct LeadListing {
    pub leads: Vec<LeadSummaryView>,
    pub stats: LeadStats,
}

impl LeadListing {
    pub fn from_leads(leads: Vec<ScoredLead>) -> Self {
        let stats = LeadStats::from_leads(&leads);
        Self {
            leads: leads.iter().map(ScoredLead::summary_view).collect(),
            stats,
        }
    }
}
