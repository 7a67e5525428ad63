// Low-level storage access traits.
//
// All state lives in six independent keys. Each key holds the
// whole serialized value of a collection and is overwritten on
// every write. The typed repositories on top of the key-value
// store are implemented in `crate::store`.

use crate::entities::*;
use std::{fmt, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("Write access is not permitted")]
    ReadOnly,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Points,
    Role,
    Reports,
    Pending,
    Approved,
    Rejected,
}

impl Key {
    pub const ALL: [Self; 6] = [
        Self::Points,
        Self::Role,
        Self::Reports,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
    ];

    #[rustfmt::skip]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Points   => "cmw_points",
            Self::Role     => "cmw_role",
            Self::Reports  => "cmw_reports",
            Self::Pending  => "cmw_pending",
            Self::Approved => "cmw_approved",
            Self::Rejected => "cmw_rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }

    pub const fn approvals(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Pending => Self::Pending,
            ApprovalStatus::Approved => Self::Approved,
            ApprovalStatus::Rejected => Self::Rejected,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait KeyValueStore {
    // Ok(None) if nothing has been stored yet
    fn load_value(&self, key: Key) -> Result<Option<String>>;

    // Replaces the current value
    fn store_value(&self, key: Key, value: String) -> Result<()>;
}

pub trait PointsRepo {
    fn load_points(&self) -> Result<u64>;
    fn store_points(&self, points: u64) -> Result<()>;
}

pub trait RoleRepo {
    fn load_role(&self) -> Result<Option<Role>>;
    fn store_role(&self, role: Role) -> Result<()>;
}

pub trait ReportRepo {
    // Newest first
    fn load_reports(&self) -> Result<Vec<Report>>;
    fn store_reports(&self, reports: &[Report]) -> Result<()>;
}

pub trait ApprovalRepo {
    // Newest first
    fn load_approvals(&self, status: ApprovalStatus) -> Result<Vec<Approval>>;
    fn store_approvals(&self, status: ApprovalStatus, approvals: &[Approval]) -> Result<()>;
}
