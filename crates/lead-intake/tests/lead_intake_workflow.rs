//! End-to-end intake scenarios through the public service facade and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use lead_intake::config::{AdminConfig, NotificationConfig};
    use lead_intake::intake::{
        LeadForm, LeadId, LeadIntakeService, LeadNotification, LeadNotifier, LeadQuery,
        LeadRepository, NotificationError, RepositoryError, ScoredLead,
    };
    use serde_json::json;

    pub(super) const PASSWORD: &str = "letmein";

    #[derive(Default, Clone)]
    pub(super) struct Store {
        records: Arc<Mutex<HashMap<LeadId, ScoredLead>>>,
    }

    impl LeadRepository for Store {
        fn insert(&self, lead: ScoredLead) -> Result<ScoredLead, RepositoryError> {
            let mut guard = self.records.lock().expect("store mutex poisoned");
            if guard.contains_key(&lead.lead_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(lead.lead_id.clone(), lead.clone());
            Ok(lead)
        }

        fn fetch(&self, id: &LeadId) -> Result<Option<ScoredLead>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("store mutex poisoned")
                .get(id)
                .cloned())
        }

        fn list(&self, query: &LeadQuery) -> Result<Vec<ScoredLead>, RepositoryError> {
            let guard = self.records.lock().expect("store mutex poisoned");
            Ok(query.apply(guard.values().cloned()))
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct Outbox {
        pub(super) sent: Arc<Mutex<Vec<LeadNotification>>>,
    }

    impl LeadNotifier for Outbox {
        fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .expect("outbox mutex poisoned")
                .push(notification);
            Ok(())
        }
    }

    pub(super) fn service(webhook: Option<&str>) -> (LeadIntakeService<Store, Outbox>, Outbox) {
        service_over(Store::default(), webhook)
    }

    pub(super) fn service_over(
        store: Store,
        webhook: Option<&str>,
    ) -> (LeadIntakeService<Store, Outbox>, Outbox) {
        let outbox = Outbox::default();
        let service = LeadIntakeService::new(
            Arc::new(store),
            Arc::new(outbox.clone()),
            NotificationConfig {
                webhook_url: webhook.map(str::to_string),
                booking_link: None,
                sender_name: "Automation Team".to_string(),
            },
            AdminConfig::with_password(PASSWORD),
        );
        (service, outbox)
    }

    pub(super) fn form(budget: serde_json::Value, timeline: &str, size: &str) -> LeadForm {
        serde_json::from_value(json!({
            "name": "Jordan Blake",
            "email": "jordan@acme.test",
            "company": "Acme",
            "companySize": size,
            "painPoints": ["Manual data entry", "Repetitive tasks"],
            "automationNeeds": ["Invoice processing", "Data processing", "Report generation"],
            "automationNeedsText": "We reconcile invoices by hand every Friday and it takes the whole afternoon.",
            "budget": budget,
            "timeline": timeline
        }))
        .expect("form deserializes")
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use chrono::{TimeZone, Utc};
use lead_intake::intake::{
    lead_router, normalize, LeadId, LeadNotification, LeadQuery, LeadRepository, ScoredLead,
    ADMIN_PASSWORD_HEADER,
};
use lead_intake::scoring::{classify, LeadCategory};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

#[test]
fn string_encoded_answers_score_like_numbers() {
    let (service, _) = service(None);

    let from_strings = service
        .submit(form(json!("8000"), "3-6 months", "75"))
        .expect("string answers accepted");
    let from_numbers = service
        .submit(form(json!(8000), "3-6 months", "75"))
        .expect("numeric answers accepted");

    // 30 budget + 10 timeline + 10 size + 15 engagement
    assert_eq!(from_strings.lead.score, 65);
    assert_eq!(from_strings.lead.score, from_numbers.lead.score);
    assert_eq!(from_strings.lead.category, LeadCategory::Warm);
}

#[test]
fn hot_submission_fans_out_follow_ups() {
    let (service, outbox) = service(Some("https://hooks.example.test/leads"));

    let receipt = service
        .submit(form(json!(20000), "Immediate", "250"))
        .expect("submission accepted");

    assert_eq!(receipt.lead.score, 100);
    assert_eq!(receipt.lead.category, LeadCategory::Hot);
    let sent = outbox.sent.lock().expect("outbox mutex poisoned").clone();
    let kinds: Vec<_> = sent.iter().map(LeadNotification::kind).collect();
    assert_eq!(
        kinds,
        vec!["follow_up_email", "strategy_call", "workflow_webhook"]
    );
}

#[test]
fn dashboard_lists_newest_first_by_default() {
    let store = Store::default();
    let stored_at = |hour: u32| {
        Utc.with_ymd_and_hms(2025, 10, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    };
    for (id, budget, hour) in [
        ("lead-000001", 1000, 9),
        ("lead-000002", 9000, 10),
        ("lead-000003", 3000, 10),
    ] {
        let profile = normalize(form(json!(budget), "1-3 months", "40")).expect("form normalizes");
        let result = classify(&profile.submission);
        store
            .insert(ScoredLead::new(
                LeadId(id.to_string()),
                profile,
                result,
                stored_at(hour),
            ))
            .expect("insert succeeds");
    }
    let (service, _) = service_over(store, None);

    let listing = service
        .list(Some(PASSWORD), &LeadQuery::default())
        .expect("dashboard opens");

    assert_eq!(listing.stats.total, 3);
    let ids: Vec<_> = listing.leads.iter().map(|lead| lead.lead_id.0.as_str()).collect();
    assert_eq!(ids, vec!["lead-000003", "lead-000002", "lead-000001"]);
}

#[tokio::test]
async fn http_submission_then_dashboard() {
    let (service, _) = service(None);
    let router = lead_router(Arc::new(service));

    let body = json!({
        "name": "Avery Chen",
        "email": "avery@globex.test",
        "companySize": "12",
        "budget": 2500,
        "timeline": "1-3 months",
        "painPoints": ["Poor communication"]
    });
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/leads")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("submit executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    // 20 budget + 20 timeline + 5 size + 3 engagement
    assert_eq!(payload["score"], json!(48));
    assert_eq!(payload["category"], json!("warm"));

    let response = router
        .oneshot(
            Request::get("/api/v1/leads?category=all")
                .header(ADMIN_PASSWORD_HEADER, PASSWORD)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("listing executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["stats"]["total"], json!(1));
    assert_eq!(payload["stats"]["averageScore"], json!(48));
    assert_eq!(payload["leads"][0]["email"], json!("avery@globex.test"));
}

#[tokio::test]
async fn malformed_json_is_rejected_before_scoring() {
    let (service, _) = service(None);
    let router = lead_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::post("/api/v1/leads")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name": "X", "painPoints": "not-a-list"}"#))
                .expect("request builds"),
        )
        .await
        .expect("submit executes");

    assert!(response.status().is_client_error());
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
