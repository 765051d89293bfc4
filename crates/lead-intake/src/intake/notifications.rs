//! Follow-up planning for accepted leads.
//!
//! Every lead gets a category-specific welcome e-mail, hot leads additionally get
//! a strategy-call booking request, and the automation webhook receives the
//! flattened lead whenever a URL is configured. Transports live behind
//! [`LeadNotifier`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadSummaryView, ScoredLead};
use crate::config::NotificationConfig;
use crate::scoring::LeadCategory;

/// Outbound follow-up produced for a single lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadNotification {
    FollowUpEmail(FollowUpEmail),
    StrategyCall(StrategyCallRequest),
    WorkflowWebhook(WorkflowWebhookEvent),
}

impl LeadNotification {
    pub fn kind(&self) -> &'static str {
        match self {
            LeadNotification::FollowUpEmail(_) => "follow_up_email",
            LeadNotification::StrategyCall(_) => "strategy_call",
            LeadNotification::WorkflowWebhook(_) => "workflow_webhook",
        }
    }

    pub fn lead_id(&self) -> &LeadId {
        match self {
            LeadNotification::FollowUpEmail(email) => &email.lead_id,
            LeadNotification::StrategyCall(call) => &call.lead_id,
            LeadNotification::WorkflowWebhook(event) => &event.payload.lead_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpEmail {
    pub lead_id: LeadId,
    pub to: String,
    pub template: LeadCategory,
    pub subject: String,
    pub body: String,
}

/// Calendar booking request for leads ready to start now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCallRequest {
    pub lead_id: LeadId,
    pub attendee_name: String,
    pub attendee_email: String,
    pub title: String,
    pub booking_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowWebhookEvent {
    pub url: String,
    pub payload: LeadSummaryView,
}

/// Trait describing outbound follow-up transports (mail provider, calendar, webhook).
pub trait LeadNotifier: Send + Sync {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("notification rejected: {0}")]
    Rejected(String),
}

pub fn plan_notifications(lead: &ScoredLead, config: &NotificationConfig) -> Vec<LeadNotification> {
    let mut planned = vec![LeadNotification::FollowUpEmail(follow_up_email(lead, config))];

    if lead.category == LeadCategory::Hot {
        let contact = &lead.profile.contact;
        planned.push(LeadNotification::StrategyCall(StrategyCallRequest {
            lead_id: lead.lead_id.clone(),
            attendee_name: contact.name.clone(),
            attendee_email: contact.email.clone(),
            title: format!("Automation strategy call: {}", company_label(lead)),
            booking_link: config.booking_link.clone(),
        }));
    }

    if let Some(url) = &config.webhook_url {
        planned.push(LeadNotification::WorkflowWebhook(WorkflowWebhookEvent {
            url: url.clone(),
            payload: lead.summary_view(),
        }));
    }

    planned
}

pub fn follow_up_email(lead: &ScoredLead, config: &NotificationConfig) -> FollowUpEmail {
    let name = &lead.profile.contact.name;
    let company = company_label(lead);

    let subject = match lead.category {
        LeadCategory::Hot => format!("Let's Get Started, {name}!"),
        LeadCategory::Warm => {
            format!("Great to Connect, {name}! Here's What We Can Do for {company}")
        }
        LeadCategory::Cold => {
            format!("Welcome {name}! Discover How Automation Can Transform {company}")
        }
    };

    let mut body = format!("Hi {name},\n\n");
    match lead.category {
        LeadCategory::Hot => {
            writeln!(
                &mut body,
                "Thank you for reaching out! You're ready to move quickly, so let's schedule a strategy call for {company} to cover:"
            )
            .expect("write email body");
            for topic in [
                "your specific automation needs",
                "current pain points and challenges",
                "a custom solution plan",
                "timeline and implementation roadmap",
            ] {
                writeln!(&mut body, "- {topic}").expect("write email body");
            }
            match &config.booking_link {
                Some(link) => {
                    writeln!(&mut body, "\nBook a time that works for you: {link}")
                        .expect("write email body");
                }
                None => {
                    writeln!(&mut body, "\nWe'll reach out shortly to find a time.")
                        .expect("write email body");
                }
            }
        }
        LeadCategory::Warm => {
            writeln!(
                &mut body,
                "Thank you for your interest in automating {company}'s processes. A few results from teams like yours:"
            )
            .expect("write email body");
            for story in [
                "85% less manual data entry, 20 hours saved per week",
                "40% higher conversion after automating lead nurturing",
                "60% lower operating costs through workflow automation",
            ] {
                writeln!(&mut body, "- {story}").expect("write email body");
            }
            writeln!(
                &mut body,
                "\nLet's schedule a discovery call to explore your automation goals."
            )
            .expect("write email body");
        }
        LeadCategory::Cold => {
            writeln!(
                &mut body,
                "Thank you for your interest in automation for {company}. We build custom automations that remove repetitive work and reduce errors."
            )
            .expect("write email body");
            writeln!(
                &mut body,
                "Over the coming weeks we'll share case studies and guides. Reply any time with questions."
            )
            .expect("write email body");
        }
    }
    write!(&mut body, "\nBest regards,\n{}", config.sender_name).expect("write signature");

    FollowUpEmail {
        lead_id: lead.lead_id.clone(),
        to: lead.profile.contact.email.clone(),
        template: lead.category,
        subject,
        body,
    }
}

fn company_label(lead: &ScoredLead) -> &str {
    let company = lead.profile.contact.company.as_str();
    if company.is_empty() {
        "your team"
    } else {
        company
    }
}
