use lead_intake::intake::{
    LeadId, LeadNotification, LeadNotifier, LeadQuery, LeadRepository, NotificationError,
    RepositoryError, ScoredLead,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<LeadId, ScoredLead>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, lead: ScoredLead) -> Result<ScoredLead, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        if guard.contains_key(&lead.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(lead.lead_id.clone(), lead.clone());
        Ok(lead)
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<ScoredLead>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &LeadQuery) -> Result<Vec<ScoredLead>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(query.apply(guard.values().cloned()))
    }
}

/// Records follow-ups and logs them; stands in for the mail, calendar and webhook transports.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotifier {
    events: Arc<Mutex<Vec<LeadNotification>>>,
}

impl LeadNotifier for LoggingNotifier {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        match &notification {
            LeadNotification::FollowUpEmail(email) => {
                info!(
                    lead_id = %email.lead_id,
                    to = %email.to,
                    subject = %email.subject,
                    "follow-up e-mail queued"
                );
            }
            LeadNotification::StrategyCall(call) => {
                info!(
                    lead_id = %call.lead_id,
                    attendee = %call.attendee_email,
                    "strategy call requested"
                );
            }
            LeadNotification::WorkflowWebhook(event) => {
                info!(
                    lead_id = %event.payload.lead_id,
                    url = %event.url,
                    "workflow webhook queued"
                );
            }
        }

        self.events
            .lock()
            .map_err(|_| NotificationError::Transport("notifier mutex poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

impl LoggingNotifier {
    pub(crate) fn events(&self) -> Vec<LeadNotification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
