use super::prelude::*;

/// Look up the current status of an approval.
///
/// The collections are scanned in the order pending, approved,
/// rejected. `None` means that the id is unknown.
pub fn approval_status<R>(repo: &R, id: &str) -> Result<Option<ApprovalStatus>>
where
    R: ApprovalRepo,
{
    for status in [
        ApprovalStatus::Pending,
        ApprovalStatus::Approved,
        ApprovalStatus::Rejected,
    ] {
        if repo.load_approvals(status)?.iter().any(|a| a.id.as_str() == id) {
            return Ok(Some(status));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn unknown_id() {
        let db = MockDb::default();
        assert_eq!(usecases::approval_status(&db, "42-pending").unwrap(), None);
    }

    #[test]
    fn prefer_pending_over_concluded() {
        let db = MockDb::default();
        // Duplicates can only be the result of a corrupted store
        let approval = Approval::build().id("1-pending").finish();
        db.store_approvals(ApprovalStatus::Rejected, &[approval.clone()])
            .unwrap();
        assert_eq!(
            usecases::approval_status(&db, "1-pending").unwrap(),
            Some(ApprovalStatus::Rejected)
        );
        db.store_approvals(ApprovalStatus::Pending, &[approval])
            .unwrap();
        assert_eq!(
            usecases::approval_status(&db, "1-pending").unwrap(),
            Some(ApprovalStatus::Pending)
        );
    }
}
