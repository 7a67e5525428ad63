use super::prelude::*;

pub fn load_approvals<R: ApprovalRepo>(repo: &R, status: ApprovalStatus) -> Result<Vec<Approval>> {
    Ok(repo.load_approvals(status)?)
}
