//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the engine and whatever persists assessments.

mod history;

pub use history::AssessmentStore;
