//! Heuristic extraction over plain resume text.
//!
//! Both halves are best-effort pattern matching and never fail: absence is
//! reported through sentinel values or empty finding lists.

pub mod feedback;
pub mod fields;
