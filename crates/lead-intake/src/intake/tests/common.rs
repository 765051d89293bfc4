use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::config::{AdminConfig, NotificationConfig};
use crate::intake::domain::{LeadId, ScoredLead};
use crate::intake::form::{normalize, LeadForm};
use crate::intake::notifications::{LeadNotification, LeadNotifier, NotificationError};
use crate::intake::repository::{LeadQuery, LeadRepository, RepositoryError};
use crate::intake::{lead_router, LeadIntakeService};
use crate::scoring::classify;

pub(super) const ADMIN_PASSWORD: &str = "dashboard-secret";

pub(super) fn hot_form() -> LeadForm {
    serde_json::from_value(json!({
        "name": "Dana Whitfield",
        "email": "dana@northwind.test",
        "phone": "+1 555 0100",
        "company": "Northwind Logistics",
        "industry": "Logistics",
        "companySize": "150",
        "painPoints": [
            "Manual data entry",
            "Repetitive tasks",
            "Poor communication",
            "Inefficient workflows",
            "Data inconsistency"
        ],
        "painPointsText": "Dispatch re-keys every order into three systems and errors slip through.",
        "automationNeeds": ["Email automation"],
        "automationNeedsText": "",
        "currentHassles": "Spreadsheets everywhere",
        "currentTools": "Excel, Outlook",
        "budget": 12000,
        "timeline": "immediate",
        "spendingCapacity": 12000
    }))
    .expect("valid hot form")
}

pub(super) fn warm_form() -> LeadForm {
    serde_json::from_value(json!({
        "name": "Priya Raman",
        "email": "priya@brightpath.test",
        "company": "BrightPath",
        "companySize": "60",
        "painPoints": ["Repetitive tasks", "Time-consuming processes"],
        "automationNeeds": ["Report generation"],
        "budget": 5000,
        "timeline": "1-3 months"
    }))
    .expect("valid warm form")
}

pub(super) fn cold_form() -> LeadForm {
    serde_json::from_value(json!({
        "name": "Sam Ortiz",
        "email": "sam@corner.test",
        "company": "Corner Bakery",
        "companySize": "5",
        "painPoints": [],
        "automationNeeds": [],
        "painPointsText": "",
        "budget": 1500,
        "timeline": "6+ months"
    }))
    .expect("valid cold form")
}

pub(super) fn scored_lead(id: &str, form: LeadForm, created_at: DateTime<Utc>) -> ScoredLead {
    let profile = normalize(form).expect("form normalizes");
    let result = classify(&profile.submission);
    ScoredLead::new(LeadId(id.to_string()), profile, result, created_at)
}

pub(super) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn notification_config() -> NotificationConfig {
    NotificationConfig {
        webhook_url: Some("https://automation.example.test/webhook/leads".to_string()),
        booking_link: Some("https://calendar.example.test/strategy".to_string()),
        sender_name: "Automation Team".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<LeadId, ScoredLead>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, lead: ScoredLead) -> Result<ScoredLead, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&lead.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(lead.lead_id.clone(), lead.clone());
        Ok(lead)
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<ScoredLead>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &LeadQuery) -> Result<Vec<ScoredLead>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(query.apply(guard.values().cloned()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<LeadNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<LeadNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(LeadNotification::kind).collect()
    }
}

impl LeadNotifier for MemoryNotifier {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Accepts e-mail, has the calendar reject the booking and finds the webhook offline.
pub(super) struct FlakyNotifier;

impl LeadNotifier for FlakyNotifier {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        match notification {
            LeadNotification::FollowUpEmail(_) => Ok(()),
            LeadNotification::StrategyCall(_) => {
                Err(NotificationError::Rejected("calendar is full".to_string()))
            }
            LeadNotification::WorkflowWebhook(_) => {
                Err(NotificationError::Transport("webhook offline".to_string()))
            }
        }
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _lead: ScoredLead) -> Result<ScoredLead, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<ScoredLead>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _query: &LeadQuery) -> Result<Vec<ScoredLead>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    LeadIntakeService<MemoryRepository, MemoryNotifier>,
    MemoryRepository,
    MemoryNotifier,
) {
    let repository = MemoryRepository::default();
    let notifier = MemoryNotifier::default();
    let service = LeadIntakeService::new(
        Arc::new(repository.clone()),
        Arc::new(notifier.clone()),
        notification_config(),
        AdminConfig::with_password(ADMIN_PASSWORD),
    );
    (service, repository, notifier)
}

pub(super) fn router_with_service(
    service: LeadIntakeService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    lead_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
