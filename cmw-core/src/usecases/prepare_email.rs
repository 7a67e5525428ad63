use super::{prelude::*, ReportDraft};

const APP_NAME: &str = "MangroveWatch";

fn email_body(draft: &ReportDraft) -> String {
    let ReportDraft {
        incident_type,
        pos,
        description,
        ..
    } = draft;
    let gps = pos.map_or_else(|| "<lat>, <lng>".to_string(), |pos| pos.to_string());
    let desc = description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("<what happened>");
    format!("Type: {incident_type}\nGPS: {gps}\nDesc: {desc}")
}

/// Subject and body of the email that is sent after approval.
pub fn prepare_email(draft: &ReportDraft) -> EmailContent {
    EmailContent {
        subject: format!("{APP_NAME} Incident: {}", draft.incident_type),
        body: email_body(draft),
    }
}

/// Template for reporting an incident by email without approval.
pub fn email_template(draft: &ReportDraft) -> String {
    format!("{APP_NAME}\n{}", email_body(draft))
}
