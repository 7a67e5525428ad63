use super::*;

pub fn submit_for_approval(
    connections: &sqlite::Connections,
    new_approval: usecases::NewApproval,
) -> Result<Approval> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::submit_for_approval(conn, new_approval).map_err(|err| {
            warn!("Failed to submit report for approval: {err}");
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn notify_about_new_pending_approvals() {
        let fixture = BackendFixture::new();
        let mut changes = fixture.db_connections.subscribe();
        let approval = flows::submit_for_approval(
            &fixture.db_connections,
            new_approval(IncidentType::SandMining, "gov@example.org"),
        )
        .unwrap();
        let event = changes.try_recv().unwrap();
        assert_eq!(event.keys, vec![Key::Pending]);
        let pending =
            flows::load_approvals(&fixture.db_connections, ApprovalStatus::Pending).unwrap();
        assert_eq!(pending, vec![approval]);
    }
}
