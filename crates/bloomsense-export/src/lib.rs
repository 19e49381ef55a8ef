//! bloomsense-export
//!
//! Plain-text and DOCX screening reports.

pub mod docx;
pub mod error;
pub mod render;
pub mod report;
pub mod styles;
