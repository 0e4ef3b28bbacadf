//! Court-session schedule tracking for a law office.
//!
//! The engine behind a session dashboard: it ingests court-session rows from
//! a spreadsheet-backed API, normalizes their Hijri date/time stamps into
//! one canonical form, detects double-booked time slots globally and per
//! representative or plaintiff, and derives the calendar summaries, filters,
//! and audit reports the office works from. Presentation, persistence, and
//! authentication live elsewhere; this crate owns the data transformations
//! and the (deliberately unconfirmed) assignment update.

pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod schedule;
pub mod session;
pub mod sheet;
pub mod state;
