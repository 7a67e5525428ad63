use super::prelude::*;
use crate::store::{prepend_capped, MAX_APPROVALS_PER_STATUS};

/// Approve a pending approval.
///
/// Returns the approved record for handing over the prepared
/// email or `None` if no pending approval with this id exists.
pub fn approve<R>(repo: &R, id: &str) -> Result<Option<Approval>>
where
    R: ApprovalRepo,
{
    conclude_pending(repo, id, ApprovalStatus::Approved)
}

/// Reject a pending approval.
///
/// Returns `None` if no pending approval with this id exists.
pub fn reject<R>(repo: &R, id: &str) -> Result<Option<Approval>>
where
    R: ApprovalRepo,
{
    conclude_pending(repo, id, ApprovalStatus::Rejected)
}

// Both collections must be written within the same
// transaction to keep them disjoint.
fn conclude_pending<R>(repo: &R, id: &str, new_status: ApprovalStatus) -> Result<Option<Approval>>
where
    R: ApprovalRepo,
{
    debug_assert!(new_status.is_terminal());
    let mut pending = repo.load_approvals(ApprovalStatus::Pending)?;
    let Some(index) = pending.iter().position(|a| a.id.as_str() == id) else {
        log::info!("No pending approval {id} found");
        return Ok(None);
    };
    let approval = pending.remove(index);
    let mut concluded = repo.load_approvals(new_status)?;
    prepend_capped(&mut concluded, approval.clone(), MAX_APPROVALS_PER_STATUS);
    repo.store_approvals(ApprovalStatus::Pending, &pending)?;
    repo.store_approvals(new_status, &concluded)?;
    log::info!("Changed status of approval {id} to {new_status}");
    Ok(Some(approval))
}
