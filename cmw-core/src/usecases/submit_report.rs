use super::{next_creation_time, prelude::*, ReportDraft};
use crate::store::{prepend_capped, MAX_REPORTS};

pub const DEFAULT_POINTS_PER_REPORT: u64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub draft: ReportDraft,
    pub role: Role,
    /// Reward for the reporter
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedReport {
    pub id: Id,
    /// The new total
    pub points: u64,
}

pub fn submit_report<R>(repo: &R, new_report: NewReport) -> Result<SubmittedReport>
where
    R: ReportRepo + PointsRepo + RoleRepo,
{
    let NewReport {
        draft,
        role,
        points,
    } = new_report;
    let mut reports = repo.load_reports()?;
    let created_at = next_creation_time(
        TimestampMs::now(),
        reports.iter().map(|r| r.created_at),
    );
    let id = Id::from_timestamp(created_at);
    let report = draft.into_report(id.clone(), created_at);
    log::info!(
        "New {} report {} at ({})",
        report.incident_type,
        report.id,
        report.pos()
    );
    prepend_capped(&mut reports, report, MAX_REPORTS);
    repo.store_reports(&reports)?;
    let points = add_points(repo, points)?;
    repo.store_role(role)?;
    Ok(SubmittedReport { id, points })
}

pub fn add_points<R>(repo: &R, delta: u64) -> Result<u64>
where
    R: PointsRepo,
{
    let points = repo.load_points()?.saturating_add(delta);
    repo.store_points(points)?;
    log::debug!("Points: {points} (+{delta})");
    Ok(points)
}
