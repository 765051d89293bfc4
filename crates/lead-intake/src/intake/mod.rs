//! Lead intake: form normalization, scoring, storage, follow-ups and the
//! dashboard listing, plus the HTTP router exposing them.

pub mod dashboard;
pub mod domain;
pub mod form;
pub mod notifications;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use dashboard::{LeadListing, LeadStats};
pub use domain::{ContactDetails, LeadContext, LeadId, LeadProfile, LeadSummaryView, ScoredLead};
pub use form::{normalize, InvalidInputError, LeadForm};
pub use notifications::{
    plan_notifications, FollowUpEmail, LeadNotification, LeadNotifier, NotificationError,
    StrategyCallRequest, WorkflowWebhookEvent,
};
pub use repository::{
    LeadQuery, LeadRepository, LeadSortField, QueryError, RepositoryError, SortOrder,
};
pub use router::{lead_router, ADMIN_PASSWORD_HEADER};
pub use service::{IntakeServiceError, LeadIntakeService, SubmissionReceipt};
