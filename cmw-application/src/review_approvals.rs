use super::*;

/// Approve a pending approval and hand the prepared
/// email over to the mail client.
pub fn approve<G>(
    connections: &sqlite::Connections,
    compose_gw: &G,
    id: &str,
) -> Result<Option<Approval>>
where
    G: ComposeGateway + ?Sized,
{
    let approved = connections.exclusive()?.transaction(|conn| {
        usecases::approve(conn, id).map_err(|err| {
            warn!("Failed to approve {id}: {err}");
            err
        })
    })?;
    // Only after the commit succeeded
    if let Some(approval) = &approved {
        compose_gw.compose(&ComposeRequest::from(approval));
    }
    Ok(approved)
}

pub fn reject(connections: &sqlite::Connections, id: &str) -> Result<Option<Approval>> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::reject(conn, id).map_err(|err| {
            warn!("Failed to reject {id}: {err}");
            err
        })
    })?)
}
