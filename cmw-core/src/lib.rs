pub mod gateways;
pub mod notify;
pub mod repositories;
pub mod store;
pub mod usecases;

pub mod entities {
    pub use cmw_entities::{
        approval::*, email::*, geo::*, id::*, incident::*, report::*, time::*, user::*,
    };
}

pub use repositories::Error as RepoError;
