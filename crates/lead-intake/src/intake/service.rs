use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::dashboard::LeadListing;
use super::domain::{LeadId, ScoredLead};
use super::form::{normalize, InvalidInputError, LeadForm};
use super::notifications::{plan_notifications, LeadNotifier};
use super::repository::{LeadQuery, LeadRepository, RepositoryError};
use crate::config::{AdminConfig, NotificationConfig};
use crate::scoring::{classify, LeadScore};

/// Service composing form normalization, the classifier, storage and follow-ups.
pub struct LeadIntakeService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    notifications: NotificationConfig,
    admin: AdminConfig,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub lead: ScoredLead,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

impl<R, N> LeadIntakeService<R, N>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        notifications: NotificationConfig,
        admin: AdminConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            notifications,
            admin,
        }
    }

    /// Score a payload without storing it or notifying anyone.
    pub fn preview(&self, form: LeadForm) -> Result<LeadScore, IntakeServiceError> {
        let profile = normalize(form)?;
        Ok(classify(&profile.submission))
    }

    /// Normalize, score, persist and fan out follow-ups for a new lead.
    ///
    /// Follow-up failures are logged and counted but never fail the submission.
    pub fn submit(&self, form: LeadForm) -> Result<SubmissionReceipt, IntakeServiceError> {
        let profile = normalize(form)?;
        let result = classify(&profile.submission);
        debug!(components = ?result.components, "lead scored");

        let lead = ScoredLead::new(next_lead_id(), profile, result, Utc::now());
        let lead = self.repository.insert(lead)?;
        info!(
            lead_id = %lead.lead_id,
            score = lead.score,
            category = %lead.category,
            "lead accepted"
        );

        let mut notifications_sent = 0;
        let mut notifications_failed = 0;
        for notification in plan_notifications(&lead, &self.notifications) {
            let kind = notification.kind();
            match self.notifier.publish(notification) {
                Ok(()) => notifications_sent += 1,
                Err(err) => {
                    notifications_failed += 1;
                    warn!(lead_id = %lead.lead_id, kind, error = %err, "follow-up not delivered");
                }
            }
        }

        Ok(SubmissionReceipt {
            lead,
            notifications_sent,
            notifications_failed,
        })
    }

    /// Dashboard listing, gated by the admin password.
    pub fn list(
        &self,
        password: Option<&str>,
        query: &LeadQuery,
    ) -> Result<LeadListing, IntakeServiceError> {
        self.authorize(password)?;
        let leads = self.repository.list(query)?;
        Ok(LeadListing::from_leads(leads))
    }

    /// Fetch a single lead, gated by the admin password.
    pub fn get(
        &self,
        password: Option<&str>,
        lead_id: &LeadId,
    ) -> Result<ScoredLead, IntakeServiceError> {
        self.authorize(password)?;
        self.repository
            .fetch(lead_id)?
            .ok_or_else(|| IntakeServiceError::NotFound(lead_id.clone()))
    }

    /// Checks the dashboard password without touching storage.
    pub fn authorize(&self, password: Option<&str>) -> Result<(), IntakeServiceError> {
        if self.admin.authorizes(password) {
            Ok(())
        } else {
            warn!("rejected dashboard request with invalid admin password");
            Err(IntakeServiceError::Unauthorized)
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unauthorized")]
    Unauthorized,
    #[error("lead {0} not found")]
    NotFound(LeadId),
}
