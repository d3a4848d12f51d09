//! The read-only description of stacks, arm and held object the interpreter
//! and planner reason about. Values coming in over the wire are untrusted
//! (`RawWorld`); `WorldSnapshot::try_new` is the one gate that gives the rest
//! of the crate a world known to satisfy every invariant of the data model.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Cheaply-clonable object identifier, e.g. `"k"`, `"l"`, or the sentinel
/// `"floor"`.
pub type ObjId = Rc<str>;

pub const FLOOR: &str = "floor";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    Brick,
    Plank,
    Ball,
    Pyramid,
    Box,
    Table,
    Floor,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Large,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Blue,
    Green,
    Yellow,
    Red,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ObjectProps {
    pub form: Form,
    pub size: Size,
    pub color: Option<Color>,
}

/// Not-yet-validated world description, the shape delivered by the
/// world-rendering UI.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct RawWorld {
    pub stacks: Vec<Vec<String>>,
    pub holding: Option<String>,
    pub arm: usize,
    pub objects: HashMap<String, ObjectProps>,
}

/// Validated, immutable description of the world at the start of planning.
///
/// Columns are `Rc`-shared so cloning a snapshot (or a search `State` derived
/// from it) is O(columns), not O(objects); only a column that actually
/// changes during search gets its own fresh `Vec`.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub stacks: Vec<Rc<Vec<ObjId>>>,
    pub holding: Option<ObjId>,
    pub arm: usize,
    pub objects: HashMap<ObjId, ObjectProps>,
}

impl WorldSnapshot {
    pub fn try_new(raw: RawWorld) -> Result<Self, WorldError> {
        let objects: HashMap<ObjId, ObjectProps> = raw
            .objects
            .into_iter()
            .map(|(id, props)| (Rc::from(id.as_str()), props))
            .collect();

        match objects.get(FLOOR) {
            Some(props) if props.form == Form::Floor => {}
            Some(_) => return Err(WorldError::FloorWrongForm),
            None => return Err(WorldError::MissingFloor),
        }
        if objects
            .iter()
            .any(|(id, props)| &**id != FLOOR && props.form == Form::Floor)
        {
            return Err(WorldError::FloorWrongForm);
        }

        let mut stacks = Vec::with_capacity(raw.stacks.len());
        for column in raw.stacks {
            let mut ids = Vec::with_capacity(column.len());
            for id in column {
                if id == FLOOR {
                    return Err(WorldError::FloorInStack);
                }
                if !objects.contains_key(id.as_str()) {
                    return Err(WorldError::UndefinedObject(id));
                }
                ids.push(ObjId::from(id.as_str()));
            }
            stacks.push(Rc::new(ids));
        }

        let holding = match raw.holding {
            Some(id) => {
                if id == FLOOR {
                    return Err(WorldError::FloorInStack);
                }
                if !objects.contains_key(id.as_str()) {
                    return Err(WorldError::UndefinedObject(id));
                }
                Some(ObjId::from(id.as_str()))
            }
            None => None,
        };

        if !stacks.is_empty() && raw.arm >= stacks.len() {
            return Err(WorldError::ArmOutOfRange {
                arm: raw.arm,
                columns: stacks.len(),
            });
        }

        Ok(WorldSnapshot {
            stacks,
            holding,
            arm: raw.arm,
            objects,
        })
    }

    pub fn props(&self, id: &str) -> Option<&ObjectProps> {
        self.objects.get(id)
    }

    pub fn is_floor(id: &str) -> bool {
        id == FLOOR
    }

    /// Number of movable (non-floor) objects, used as `N` by the pick/drop
    /// cost formula.
    pub fn object_count(&self) -> usize {
        self.objects.len() - 1
    }

    /// Every identifier present anywhere in the world, including the one
    /// currently held and the floor sentinel.
    pub fn all_ids(&self) -> impl Iterator<Item = &ObjId> {
        self.objects.keys()
    }
}
