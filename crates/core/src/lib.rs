//! # Careflow Core
//!
//! Outline composition and navigation state for the care-team inbox.
//!
//! This crate contains:
//! - Typed communication records (email, fax, SMS, call) and the ambient-scribe encounter
//! - Outline builders that turn a record or a workflow state into a navigable tree
//! - The navigation state manager (drill-down stack, outline selection, collapsed sections)
//! - Mock fixtures and the backend call translation
//!
//! **No API concerns**: HTTP servers and command-line handling belong in the binaries.

pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod fixtures;
pub mod navigation;
pub mod outline;
pub mod transform;

pub use config::CoreConfig;
pub use entities::{Communication, CommunicationKind};
pub use error::{CoreError, CoreResult};
pub use fixtures::FixtureStore;
pub use navigation::NavigationState;
pub use outline::{OutlineItem, OutlineStatus};
