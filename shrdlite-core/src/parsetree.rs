//! The external interface (spec §6.1): the shape of command trees delivered
//! by the upstream grammar parser. These are plain data — `serde`-derived so
//! the wire format is JSON, the same way `modus`'s `ModusClause`/`Expression`
//! is the compiled-from-text AST the rest of the pipeline consumes.

use serde::{Deserialize, Serialize};

use crate::world::{Color, Form, Size};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantifier {
    The,
    Any,
    All,
}

/// `form` in the wire format ranges over the usual object forms plus the
/// sentinel `"anyform"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormSpec {
    Brick,
    Plank,
    Ball,
    Pyramid,
    Box,
    Table,
    Floor,
    Anyform,
}

impl FormSpec {
    pub fn matches(self, form: Form) -> bool {
        match self {
            FormSpec::Anyform => true,
            FormSpec::Brick => form == Form::Brick,
            FormSpec::Plank => form == Form::Plank,
            FormSpec::Ball => form == Form::Ball,
            FormSpec::Pyramid => form == Form::Pyramid,
            FormSpec::Box => form == Form::Box,
            FormSpec::Table => form == Form::Table,
            FormSpec::Floor => form == Form::Floor,
        }
    }

    pub fn is_floor(self) -> bool {
        matches!(self, FormSpec::Floor)
    }
}

/// A (possibly recursive) referring-expression description (spec §4.1a).
/// `object` nests an inner description whose scalar properties and location
/// clauses must *also* hold — every nesting level contributes constraints
/// that are ANDed together, per §4.1a's "matches all explicitly given scalar
/// properties at every nesting level".
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Object {
    pub size: Option<Size>,
    pub color: Option<Color>,
    pub form: FormSpec,
    #[serde(default)]
    pub object: Option<Box<Object>>,
    #[serde(default)]
    pub location: Option<Box<Location>>,
}

impl Object {
    pub fn simple(form: FormSpec) -> Self {
        Object {
            size: None,
            color: None,
            form,
            object: None,
            location: None,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub quantifier: Quantifier,
    pub object: Object,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationSpec {
    Ontop,
    Inside,
    Above,
    Under,
    Leftof,
    Rightof,
    Beside,
}

impl From<RelationSpec> for crate::logic::Relation {
    fn from(r: RelationSpec) -> Self {
        use crate::logic::Relation as R;
        match r {
            RelationSpec::Ontop => R::OnTop,
            RelationSpec::Inside => R::Inside,
            RelationSpec::Above => R::Above,
            RelationSpec::Under => R::Under,
            RelationSpec::Leftof => R::LeftOf,
            RelationSpec::Rightof => R::RightOf,
            RelationSpec::Beside => R::Beside,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Location {
    pub relation: RelationSpec,
    pub entity: Entity,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Take,
    Put,
    Move,
}

/// A command tree as delivered by the grammar parser. `entity`/`location`
/// are optional at the wire level because the external parser may fail to
/// fill them in (producing `InterpretError::NoEntity`/`NoLocation`) — the
/// interpreter, not `serde`, is the gate that turns this into a well-formed
/// request.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Command {
    pub command: CommandKind,
    #[serde(default)]
    pub entity: Option<Entity>,
    #[serde(default)]
    pub location: Option<Location>,
}
