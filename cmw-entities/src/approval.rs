use std::ops::Deref;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{email::EmailContent, report::Report};

/// A report that awaits the decision of an administrator before
/// an email is handed over to the mail client of the reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    #[serde(flatten)]
    pub report: Report,
    /// Might be empty
    pub recipient_email: String,
    pub subject: String,
    pub email_body: String,
}

impl Approval {
    pub fn email_content(&self) -> EmailContent {
        EmailContent {
            subject: self.subject.clone(),
            body: self.email_body.clone(),
        }
    }
}

impl Deref for Approval {
    type Target = Report;

    fn deref(&self) -> &Report {
        &self.report
    }
}

/// Each approval is stored in exactly one collection per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}
