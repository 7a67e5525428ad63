#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # cmw-entities
//!
//! Reusable, agnostic domain entities for Community Mangrove Watch.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod approval;
pub mod email;
pub mod geo;
pub mod id;
pub mod incident;
pub mod report;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
