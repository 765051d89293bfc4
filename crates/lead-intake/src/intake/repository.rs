use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{LeadId, ScoredLead};
use crate::scoring::{LeadCategory, UnknownCategory};

/// Storage abstraction so the service can run against any document store.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, lead: ScoredLead) -> Result<ScoredLead, RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<ScoredLead>, RepositoryError>;
    fn list(&self, query: &LeadQuery) -> Result<Vec<ScoredLead>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadSortField {
    #[default]
    CreatedAt,
    Score,
}

impl FromStr for LeadSortField {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "score" => Ok(Self::Score),
            other => Err(QueryError::SortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::SortOrder(value.to_string())),
        }
    }
}

/// Dashboard listing filter. Defaults to every category, newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadQuery {
    pub category: Option<LeadCategory>,
    pub sort_by: LeadSortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Category(#[from] UnknownCategory),
    #[error("unknown sort field '{0}' (expected createdAt or score)")]
    SortField(String),
    #[error("unknown sort order '{0}' (expected asc or desc)")]
    SortOrder(String),
}

impl LeadQuery {
    /// Build a query from dashboard parameters; `"all"` or blank disables the category filter.
    pub fn from_params(
        category: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Self, QueryError> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(value) if value.eq_ignore_ascii_case("all") => None,
            Some(value) => Some(value.parse::<LeadCategory>()?),
        };

        let sort_by = match sort_by.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse()?,
            None => LeadSortField::default(),
        };

        let order = match order.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse()?,
            None => SortOrder::default(),
        };

        Ok(Self {
            category,
            sort_by,
            order,
        })
    }

    pub fn matches(&self, lead: &ScoredLead) -> bool {
        self.category
            .map(|category| lead.category == category)
            .unwrap_or(true)
    }

    /// Filter then stable-sort, shared by in-memory adapters.
    pub fn apply(&self, leads: impl IntoIterator<Item = ScoredLead>) -> Vec<ScoredLead> {
        let mut selected: Vec<ScoredLead> =
            leads.into_iter().filter(|lead| self.matches(lead)).collect();
        selected.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        selected
    }

    /// Ties fall back to the lead id, which follows submission order.
    fn compare(&self, a: &ScoredLead, b: &ScoredLead) -> Ordering {
        let primary = match self.sort_by {
            LeadSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            LeadSortField::Score => a.score.cmp(&b.score),
        };
        primary.then_with(|| a.lead_id.cmp(&b.lead_id))
    }
}
