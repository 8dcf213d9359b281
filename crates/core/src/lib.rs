//! # Directory Core
//!
//! Core logic for the doctor directory.
//!
//! This crate contains the pure data operations:
//! - Doctor record ingestion into a validated, immutable [`Catalogue`]
//! - Filter state and its URL query encoding
//! - The filter/sort pipeline, search suggestions and active-filter badges
//! - Reducer-style state transitions over a single-owner [`Directory`]
//! - The one-shot data source load
//!
//! **No API concerns**: HTTP servers, HTML rendering and the CLI belong in `api-rest`,
//! `api-shared` and `directory-cli`.

pub mod badges;
pub mod config;
pub mod constants;
pub mod doctor;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod query;
pub mod source;
pub mod state;
pub mod suggestions;

pub use badges::{active_badges, Badge, BadgeKind};
pub use config::{DirectoryConfig, SourceLocation};
pub use doctor::{Catalogue, Doctor, Experience, Fee, Specialty};
pub use error::{DirectoryError, DirectoryResult};
pub use filters::{ConsultationType, FilterState, SortDirection, SortField, SortKey, UnknownValue};
pub use pipeline::apply_filters;
pub use query::{href, load_state_from_query, update_url_state};
pub use source::load_catalogue;
pub use state::{transition, Action, Directory};
pub use suggestions::{default_suggestions, suggestions};
