//! Error types for the planner, split the way the teacher splits its own:
//! typed, `thiserror`-derived domain errors for the logic, converted at the
//! boundary into `codespan_reporting::diagnostic::Diagnostic` for
//! presentation — mirroring how `modus`'s SLD resolution returns
//! `Result<_, Diagnostic<()>>` for semantic (as opposed to parse) errors.

use codespan_reporting::diagnostic::Diagnostic;
use thiserror::Error;

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum WorldError {
    #[error("identifier `{0}` appears in the world but has no entry in `objects`")]
    UndefinedObject(String),
    #[error("the floor sentinel may not be placed inside a stack or held")]
    FloorInStack,
    #[error("`objects` has no definition for the floor sentinel, or something else claims form `floor`")]
    MissingFloor,
    #[error("only the floor sentinel may have form `floor`")]
    FloorWrongForm,
    #[error("arm position {arm} is out of range for {columns} columns")]
    ArmOutOfRange { arm: usize, columns: usize },
}

/// Errors raised while resolving referring expressions and compiling a
/// command into a DNF goal (spec §7's table, in order).
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum InterpretError {
    #[error("the command has no entity to act on")]
    NoEntity,
    #[error("the command has no location to act on")]
    NoLocation,
    #[error("no object in the world matches the given description")]
    NoSuchEntity,
    #[error("the description matches more than one object")]
    Ambiguous,
    #[error("the floor cannot be picked up")]
    CannotPickUpFloor,
    #[error("put requires something to already be held")]
    NotHolding,
    #[error("no feasible goal can be built from this command")]
    NoValidSolution,
    #[error("quantifier `all` is not supported in this position")]
    UnsupportedAll,
    /// The relation extensor was asked to evaluate a relation/position
    /// combination the floor-usage rule should have already excluded. Only
    /// reachable if a caller bypasses the compiler's own validation; kept as
    /// a typed variant (rather than a panic) so embedders get a `Result`
    /// instead of an abort.
    #[error("internal error: relation extensor hit an unsupported combination")]
    UnsupportedRelation,
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PlannerError {
    #[error("search exceeded its wall-clock timeout")]
    SearchTimeout,
    #[error("search exceeded its expanded-node limit")]
    ExpandedNodeLimitExceeded,
    #[error("no path from the initial state satisfies the goal")]
    NoPath,
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ShrdliteError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Interpret(#[from] InterpretError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

impl ShrdliteError {
    /// Unspanned presentation diagnostic. Command trees carry no source
    /// position (the upstream grammar parser already consumed the source
    /// text), so this is always a message-only `Diagnostic::error()`, the
    /// same shape `modus` falls back to for errors without a `Label`.
    pub fn to_diagnostic(&self) -> Diagnostic<()> {
        Diagnostic::error().with_message(self.to_string())
    }
}
