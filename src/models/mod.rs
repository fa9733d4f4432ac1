//! Core data models for the Leave Adjudication Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod date_interval;
mod decision;
mod employee;
mod leave_request;
mod rule_facts;

pub use audit::{AuditStep, AuditTrace};
pub use date_interval::DateInterval;
pub use decision::{Decision, DecisionStatus};
pub use employee::{Employee, Position};
pub use leave_request::LeaveRequest;
pub use rule_facts::{PriorityRank, RestrictedOverlap, RuleFacts};
