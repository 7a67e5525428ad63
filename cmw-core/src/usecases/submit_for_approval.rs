use super::{next_creation_time, prelude::*, ReportDraft};
use crate::store::{prepend_capped, MAX_APPROVALS_PER_STATUS};

#[derive(Debug, Clone, PartialEq)]
pub struct NewApproval {
    pub draft: ReportDraft,
    /// Not validated, might even be empty
    pub recipient_email: String,
    pub email: EmailContent,
}

pub fn submit_for_approval<R>(repo: &R, new_approval: NewApproval) -> Result<Approval>
where
    R: ApprovalRepo,
{
    let NewApproval {
        draft,
        recipient_email,
        email: EmailContent { subject, body },
    } = new_approval;
    let mut pending = repo.load_approvals(ApprovalStatus::Pending)?;
    // Identifiers must be unique across all collections
    let mut created = pending.iter().map(|a| a.created_at).collect::<Vec<_>>();
    for status in [ApprovalStatus::Approved, ApprovalStatus::Rejected] {
        created.extend(repo.load_approvals(status)?.iter().map(|a| a.created_at));
    }
    let created_at = next_creation_time(TimestampMs::now(), created);
    let id = Id::pending_from_timestamp(created_at);
    let approval = Approval {
        report: draft.into_report(id, created_at),
        recipient_email,
        subject,
        email_body: body,
    };
    if approval.recipient_email.trim().is_empty() {
        log::info!("Approval {} has no recipient", approval.id);
    }
    log::info!(
        "Submitted {} report {} for approval",
        approval.incident_type,
        approval.id
    );
    prepend_capped(&mut pending, approval.clone(), MAX_APPROVALS_PER_STATUS);
    repo.store_approvals(ApprovalStatus::Pending, &pending)?;
    Ok(approval)
}
