//! Multi-gameweek fantasy-football transfer planning: squad projection,
//! free-transfer and point-hit accounting, roster validation, chip rules and
//! heuristic transfer suggestions over an in-memory season catalog.

pub mod catalog;
pub mod chips;
pub mod error;
pub mod ledger;
pub mod plan;
pub mod projector;
pub mod risk;
pub mod session;
pub mod store;
pub mod suggest;
pub mod validator;

pub use catalog::{Availability, Catalog, CatalogPlayer, Fixture, Position};
pub use error::{ChipError, SessionError, TransferError};
pub use plan::{Chip, GameweekPlan, Plan, SnapshotPick, SquadSnapshot, Transfer};
pub use projector::{project, Projection};
pub use session::PlannerSession;
pub use suggest::{suggest, Suggestion, SuggestionWeights};
pub use validator::{validate, ValidationReport};
