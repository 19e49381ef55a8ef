//! bloomsense-audit
//!
//! Application-level audit events for clinical records.

pub mod events;
