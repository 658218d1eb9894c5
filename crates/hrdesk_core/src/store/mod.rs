//! Record store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the five logical employee operations as a trait seam.
//! - Isolate SQL details from the interaction shell.
//!
//! # Invariants
//! - Every user-supplied value reaches SQL as a bound parameter.
//! - Operations keyed by name affect every matching row.

pub mod employee_store;
