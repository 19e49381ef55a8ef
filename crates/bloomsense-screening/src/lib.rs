//! bloomsense-screening
//!
//! The screening lifecycle: loading a question bank, collecting answers in a
//! session, scoring, and recording the result exactly once.

pub mod bank;
pub mod error;
pub mod recorder;
pub mod session;
pub mod sink;
