//! Domain model for employee records.
//!
//! # Invariants
//! - Records carry no identity beyond `name`.
//! - Instances are immutable once constructed.

pub mod employee;
