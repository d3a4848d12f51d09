//! Goal interpretation, A* state-space search and plan rendering for the
//! Shrdlite blocks-world planner (spec §1–§9). The crate is organised the
//! way the teacher splits its own pipeline into small, single-purpose
//! modules wired together by a thin top-level driver (`plan`), rather than
//! one monolithic file.

pub mod compiler;
pub mod config;
pub mod error;
pub mod extensor;
pub mod feasibility;
pub mod graph_export;
pub mod heuristic;
pub mod logic;
pub mod parsetree;
pub mod plan;
pub mod render;
pub mod resolver;
pub mod search;
pub mod state;
pub mod trace;
pub mod world;

#[cfg(any(test, feature = "testdsl"))]
pub mod testdsl;

pub use config::Config;
pub use error::{InterpretError, PlannerError, ShrdliteError, WorldError};
pub use logic::{Conjunction, Dnf, Literal, Relation};
pub use parsetree::Command;
pub use plan::{plan_interpretations, plan_one, PlanOutcome};
pub use world::{RawWorld, WorldSnapshot};
