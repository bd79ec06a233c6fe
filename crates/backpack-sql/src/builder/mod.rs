//! Fluent statement builders.
//!
//! [`Select`] accumulates clause tokens and a parallel bound-value list;
//! [`Insert`], [`Update`], and [`Delete`] cover the write statements the
//! persistence layer issues.

mod select;
mod write;

pub use select::{FieldList, JoinKind, LimitOpts, Select};
pub use write::{Delete, Insert, Update};
