use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{ContactDetails, LeadContext, LeadProfile};
use crate::scoring::{LeadSubmission, Timeline};

/// Raw payload posted by the intake form. Every field may be absent; numeric
/// answers arrive either as JSON numbers or as the strings an HTML input produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<Value>,
    pub pain_points: Option<Vec<String>>,
    pub pain_points_text: Option<String>,
    pub automation_needs: Option<Vec<String>>,
    pub automation_needs_text: Option<String>,
    pub current_hassles: Option<String>,
    pub current_tools: Option<String>,
    pub budget: Option<Value>,
    pub timeline: Option<String>,
    pub spending_capacity: Option<Value>,
}

/// Input the intake boundary refuses to coerce.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("email address must contain '@'")]
    InvalidEmail,
    #[error("budget must be a number, found {0}")]
    InvalidBudget(String),
    #[error("budget cannot be negative (found {0})")]
    NegativeBudget(f64),
    #[error("company size must be a whole number, found {0}")]
    InvalidCompanySize(String),
    #[error("spending capacity must be a non-negative number, found {0}")]
    InvalidSpendingCapacity(String),
}

/// Coerce a raw form payload into the typed profile the classifier consumes.
pub fn normalize(form: LeadForm) -> Result<LeadProfile, InvalidInputError> {
    let name = required_text(form.name, "name")?;
    let email = required_text(form.email, "email")?;
    if !email.contains('@') {
        return Err(InvalidInputError::InvalidEmail);
    }

    let budget = coerce_amount(form.budget.as_ref())
        .ok_or_else(|| InvalidInputError::InvalidBudget(describe(form.budget.as_ref())))?;
    if budget < 0.0 {
        return Err(InvalidInputError::NegativeBudget(budget));
    }

    let spending_capacity = coerce_amount(form.spending_capacity.as_ref())
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| {
            InvalidInputError::InvalidSpendingCapacity(describe(form.spending_capacity.as_ref()))
        })?;

    let company_size = coerce_headcount(form.company_size.as_ref()).ok_or_else(|| {
        InvalidInputError::InvalidCompanySize(describe(form.company_size.as_ref()))
    })?;

    let submission = LeadSubmission {
        budget,
        timeline: form
            .timeline
            .as_deref()
            .map(Timeline::from_label)
            .unwrap_or(Timeline::Unrecognized),
        company_size,
        pain_points: tag_set(form.pain_points),
        automation_needs: tag_set(form.automation_needs),
        pain_points_text: form.pain_points_text.unwrap_or_default(),
        automation_needs_text: form.automation_needs_text.unwrap_or_default(),
    };

    Ok(LeadProfile {
        contact: ContactDetails {
            name,
            email,
            phone: optional_text(form.phone),
            company: optional_text(form.company),
            industry: optional_text(form.industry),
        },
        submission,
        context: LeadContext {
            current_hassles: form.current_hassles.unwrap_or_default(),
            current_tools: form.current_tools.unwrap_or_default(),
            spending_capacity,
        },
    })
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, InvalidInputError> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(InvalidInputError::MissingField(field))
}

fn optional_text(value: Option<String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}

fn tag_set(tags: Option<Vec<String>>) -> BTreeSet<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Missing, blank, non-numeric or non-finite strings become 0; only non-scalar
/// JSON is rejected.
fn coerce_amount(value: Option<&Value>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(Value::Number(number)) => Some(number.as_f64().unwrap_or_default()),
        Some(Value::String(raw)) => {
            let cleaned: String = raw
                .trim()
                .trim_start_matches('$')
                .chars()
                .filter(|ch| *ch != ',')
                .collect();
            Some(
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|amount| amount.is_finite())
                    .unwrap_or(0.0),
            )
        }
        Some(_) => None,
    }
}

/// Unparseable headcounts become 0 and negative ones are clamped to 0, which
/// lands both in the smallest size bracket.
fn coerce_headcount(value: Option<&Value>) -> Option<i64> {
    let headcount = match value {
        None => 0,
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(raw)) => leading_integer(raw).unwrap_or(0),
        Some(_) => return None,
    };
    Some(headcount.max(0))
}

/// Optional sign followed by digits, ignoring anything after the digits.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn describe(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_else(|| "null".to_string())
}
