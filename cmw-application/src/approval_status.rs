use super::*;

pub fn approval_status(
    connections: &sqlite::Connections,
    id: &str,
) -> Result<Option<ApprovalStatus>> {
    let db = connections.shared()?;
    Ok(usecases::approval_status(&db, id)?)
}
