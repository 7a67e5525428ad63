use super::prelude::*;

pub fn load_reports<R: ReportRepo>(repo: &R) -> Result<Vec<Report>> {
    Ok(repo.load_reports()?)
}

pub fn recent_reports<R: ReportRepo>(repo: &R, limit: usize) -> Result<Vec<Report>> {
    let mut reports = repo.load_reports()?;
    reports.truncate(limit);
    Ok(reports)
}
