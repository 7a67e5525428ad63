#[macro_use]
extern crate log;

mod approval_status;
mod load;
mod review_approvals;
mod submit_for_approval;
mod submit_report;
mod wakeup;
mod watch_approval_status;
mod watch_pending_approvals;
mod watch_store_changes;

pub mod prelude {
    pub use super::{
        approval_status::*, load::*, review_approvals::*, submit_for_approval::*,
        submit_report::*, watch_approval_status::*, watch_pending_approvals::*,
        watch_store_changes::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use cmw_core::{entities::*, gateways::compose::ComposeGateway, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use cmw_db_sqlite::Connections;
}
