use crate::infra::{InMemoryLeadRepository, LoggingNotifier};
use clap::Args;
use lead_intake::config::{AdminConfig, NotificationConfig};
use lead_intake::error::AppError;
use lead_intake::intake::{
    LeadForm, LeadIntakeService, LeadNotification, LeadQuery, LeadSortField, SortOrder,
};
use lead_intake::scoring::{classify, LeadScore, LeadSubmission, Timeline};
use serde_json::json;
use std::sync::Arc;

const DEMO_PASSWORD: &str = "demo";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Budget in currency units
    #[arg(long, default_value_t = 0.0)]
    pub(crate) budget: f64,
    /// One of: immediate, "1-3 months", "3-6 months", "6+ months"
    #[arg(long, default_value = "")]
    pub(crate) timeline: String,
    /// Employee headcount
    #[arg(long, default_value_t = 0)]
    pub(crate) company_size: i64,
    /// Selected pain point (repeatable)
    #[arg(long = "pain-point")]
    pub(crate) pain_points: Vec<String>,
    /// Selected automation need (repeatable)
    #[arg(long = "automation-need")]
    pub(crate) automation_needs: Vec<String>,
    /// Free-text description of pain points
    #[arg(long, default_value = "")]
    pub(crate) pain_points_text: String,
    /// Free-text description of automation needs
    #[arg(long, default_value = "")]
    pub(crate) automation_needs_text: String,
    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Webhook URL to include in the planned follow-ups
    #[arg(long)]
    pub(crate) webhook_url: Option<String>,
    /// Booking link to include in hot-lead e-mails
    #[arg(long)]
    pub(crate) booking_link: Option<String>,
    /// Order the dashboard by score instead of submission time
    #[arg(long)]
    pub(crate) sort_by_score: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        budget,
        timeline,
        company_size,
        pain_points,
        automation_needs,
        pain_points_text,
        automation_needs_text,
        json,
    } = args;

    let submission = LeadSubmission {
        budget,
        timeline: Timeline::from_label(&timeline),
        company_size,
        pain_points: pain_points.into_iter().collect(),
        automation_needs: automation_needs.into_iter().collect(),
        pain_points_text,
        automation_needs_text,
    };
    let result = classify(&submission);

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Score payload unavailable: {err}"),
        }
    } else {
        render_score(&result);
    }

    Ok(())
}

fn render_score(result: &LeadScore) {
    println!("Lead score: {}/100 ({} lead)", result.score, result.category);
    for component in &result.components {
        println!(
            "  - {:?}: {} ({})",
            component.factor, component.points, component.notes
        );
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        webhook_url,
        booking_link,
        sort_by_score,
    } = args;

    let notifier = Arc::new(LoggingNotifier::default());
    let service = LeadIntakeService::new(
        Arc::new(InMemoryLeadRepository::default()),
        notifier.clone(),
        NotificationConfig {
            webhook_url,
            booking_link,
            ..NotificationConfig::default()
        },
        AdminConfig::with_password(DEMO_PASSWORD),
    );

    println!("Lead intake demo");
    for form in demo_forms() {
        let receipt = service.submit(form)?;
        let lead = &receipt.lead;
        println!(
            "\n- {} <{}> from {} -> {} ({} points)",
            lead.profile.contact.name,
            lead.profile.contact.email,
            lead.profile.contact.company,
            lead.category,
            lead.score
        );
        for component in &lead.components {
            println!(
                "    {:?}: {} ({})",
                component.factor, component.points, component.notes
            );
        }
        println!(
            "    follow-ups: {} sent, {} failed",
            receipt.notifications_sent, receipt.notifications_failed
        );
    }

    println!("\nPlanned follow-ups:");
    for notification in notifier.events() {
        match notification {
            LeadNotification::FollowUpEmail(email) => {
                println!("  - e-mail to {}: {}", email.to, email.subject)
            }
            LeadNotification::StrategyCall(call) => {
                println!("  - calendar: {} with {}", call.title, call.attendee_email)
            }
            LeadNotification::WorkflowWebhook(event) => {
                println!("  - webhook {} for {}", event.url, event.payload.lead_id)
            }
        }
    }

    let query = LeadQuery {
        category: None,
        sort_by: if sort_by_score {
            LeadSortField::Score
        } else {
            LeadSortField::CreatedAt
        },
        order: SortOrder::Desc,
    };
    let listing = service.list(Some(DEMO_PASSWORD), &query)?;
    let stats = listing.stats;
    println!(
        "\nDashboard: {} leads | {} hot / {} warm / {} cold | average score {}",
        stats.total, stats.hot, stats.warm, stats.cold, stats.average_score
    );
    for lead in &listing.leads {
        println!(
            "  {:<12} {:<18} {:>3}  {}",
            lead.lead_id.0, lead.company, lead.score, lead.category
        );
    }

    Ok(())
}

fn demo_forms() -> Vec<LeadForm> {
    [
        json!({
            "name": "Dana Whitfield",
            "email": "dana@northwind.test",
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
            "budget": 12000,
            "timeline": "immediate"
        }),
        json!({
            "name": "Priya Raman",
            "email": "priya@brightpath.test",
            "company": "BrightPath",
            "industry": "Education",
            "companySize": "60",
            "painPoints": ["Repetitive tasks", "Time-consuming processes"],
            "automationNeeds": ["Report generation"],
            "budget": 5000,
            "timeline": "1-3 months"
        }),
        json!({
            "name": "Sam Ortiz",
            "email": "sam@corner.test",
            "company": "Corner Bakery",
            "industry": "Food service",
            "companySize": "5",
            "budget": 1500,
            "timeline": "6+ months"
        }),
    ]
    .into_iter()
    .filter_map(|value| serde_json::from_value(value).ok())
    .collect()
}
