//! Leave Adjudication Engine
//!
//! This crate evaluates employee leave requests against organizational policy:
//! deterministic rules derive facts from the requested dates and the employee
//! record, a generative reasoning backend weighs them, and its narrative is
//! parsed into a structured, auditable decision.

#![warn(missing_docs)]

pub mod adjudication;
pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod rules;
