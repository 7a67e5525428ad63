use super::*;

pub fn submit_report(
    connections: &sqlite::Connections,
    new_report: usecases::NewReport,
) -> Result<usecases::SubmittedReport> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::submit_report(conn, new_report).map_err(|err| {
            warn!("Failed to submit report: {err}");
            err
        })
    })?)
}
