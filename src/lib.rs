//! # Canvas Task Auditor
//!
//! Audits course configuration on a Canvas Learning Management System
//! instance against institutional policy rules. For each course it fetches
//! the relevant assignments, compares their actual configuration against
//! the expected values for the assignment's category (academic forum, team
//! project, final work or final quiz) and renders a pass/fail checklist,
//! including team-roster completeness for team projects.
//!
//! The crate is read-only with respect to Canvas: every entity is fetched
//! fresh per run, compared, reported and discarded. Network access goes
//! through [`client::CanvasClient`]; the analysis layers only depend on the
//! [`client::CanvasApi`] trait so they can be exercised against canned data.
//!
//! ## Usage
//!
//! ```no_run
//! use canvas_task_auditor::client::CanvasClient;
//! use canvas_task_auditor::credentials::Credentials;
//! use canvas_task_auditor::rules::AssignmentCategory;
//! use canvas_task_auditor::{analyzer, canvas};
//!
//! let client = CanvasClient::new(Credentials::obtain());
//! if let Some(assignments) = canvas::fetch_assignments(&client, "12345") {
//!     for assignment in &assignments {
//!         let checklist =
//!             analyzer::analyze(&client, "12345", assignment, AssignmentCategory::Forum, false);
//!         println!("{} all pass: {}", assignment.name, checklist.all_passed());
//!     }
//! }
//! ```
pub mod analyzer; // Per-assignment comparison against the Rule Catalog.
pub mod canvas; // Typed fetch helpers for the Canvas endpoints.
pub mod checklist;
pub mod client; // HTTP transport and pagination.
pub mod credentials; // Bearer-token configuration.
pub mod models;
pub mod report; // Terminal rendering of headers and checklists.
pub mod roster; // Team-roster completeness resolution.
pub mod rules; // Category enumeration and expected values.
pub mod text; // Normalization for name comparisons.

#[cfg(test)]
mod testutil;

// Exports key types for external use.
pub use checklist::{CheckRow, Checklist};
pub use client::{CanvasApi, CanvasClient, HttpMethod};
pub use credentials::Credentials;
pub use models::{Assignment, Course, Student};
pub use roster::TeamRoster;
pub use rules::AssignmentCategory;
