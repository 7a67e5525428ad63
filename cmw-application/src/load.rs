use super::*;

pub fn load_reports(connections: &sqlite::Connections) -> Result<Vec<Report>> {
    let db = connections.shared()?;
    Ok(usecases::load_reports(&db)?)
}

pub fn load_approvals(
    connections: &sqlite::Connections,
    status: ApprovalStatus,
) -> Result<Vec<Approval>> {
    let db = connections.shared()?;
    Ok(usecases::load_approvals(&db, status)?)
}

/// Markers of the submitted reports followed by the samples.
pub fn map_markers(
    connections: &sqlite::Connections,
    samples: &[Report],
    filter: usecases::IncidentFilter,
) -> Result<Vec<usecases::MapMarker>> {
    let reports = load_reports(connections)?;
    Ok(usecases::map_markers(reports.iter().chain(samples), filter))
}

pub fn profile(connections: &sqlite::Connections) -> Result<usecases::Profile> {
    let db = connections.shared()?;
    Ok(usecases::profile(&db)?)
}

pub fn leaderboard(
    connections: &sqlite::Connections,
    contributors: &[Contributor],
) -> Result<Vec<usecases::LeaderboardEntry>> {
    let points = profile(connections)?.points;
    Ok(usecases::leaderboard(contributors, points))
}
