//! The relation extensor (spec §4.4, glossary entry "Extensor"): the
//! set-valued function mapping (object, relation) to every identifier that
//! stands in that relation to the object in a given arrangement of stacks.
//!
//! Shared by the resolver (which extends over the initial `WorldSnapshot`)
//! and the goal test / heuristic (which extend over a search `State`) — both
//! are just `stacks: &[Rc<Vec<ObjId>>]` plus an optional `holding`, so one
//! implementation serves both call sites.

use std::collections::HashSet;
use std::rc::Rc;

use crate::logic::Relation;
use crate::world::{ObjId, FLOOR};

/// Column/height of `id`, or `None` if it is held or not present in any
/// column (including the floor sentinel, which has no position).
pub fn locate(stacks: &[Rc<Vec<ObjId>>], holding: Option<&ObjId>, id: &str) -> Option<(usize, usize)> {
    if holding.map(|h| &**h == id).unwrap_or(false) {
        return None;
    }
    for (x, column) in stacks.iter().enumerate() {
        if let Some(y) = column.iter().position(|o| &**o == id) {
            return Some((x, y));
        }
    }
    None
}

/// Every identifier standing in `relation` to `id` given the current
/// arrangement. The held object (if any) participates only in `holding`
/// goals — resolved per spec §9's open question — so it never appears as
/// the subject of a positional query and never appears in a related set.
pub fn related_ids(
    stacks: &[Rc<Vec<ObjId>>],
    holding: Option<&ObjId>,
    id: &str,
    relation: Relation,
) -> HashSet<ObjId> {
    if holding.map(|h| &**h == id).unwrap_or(false) {
        return HashSet::new();
    }

    if id == FLOOR {
        return match relation {
            Relation::Under => stacks.iter().flat_map(|c| c.iter().cloned()).collect(),
            _ => HashSet::new(),
        };
    }

    let (x, y) = match locate(stacks, holding, id) {
        Some(pos) => pos,
        None => return HashSet::new(),
    };
    let column = &stacks[x];

    match relation {
        Relation::Holding => HashSet::new(),
        Relation::LeftOf => stacks[x + 1..]
            .iter()
            .flat_map(|c| c.iter().cloned())
            .collect(),
        Relation::RightOf => stacks[..x]
            .iter()
            .flat_map(|c| c.iter().cloned())
            .collect(),
        Relation::Beside => {
            let mut set = HashSet::new();
            if x > 0 {
                set.extend(stacks[x - 1].iter().cloned());
            }
            if x + 1 < stacks.len() {
                set.extend(stacks[x + 1].iter().cloned());
            }
            set
        }
        Relation::Inside => {
            let mut set = HashSet::new();
            if y > 0 {
                set.insert(column[y - 1].clone());
            }
            set
        }
        Relation::OnTop => {
            let mut set = HashSet::new();
            if y > 0 {
                set.insert(column[y - 1].clone());
            } else {
                set.insert(ObjId::from(FLOOR));
            }
            set
        }
        Relation::Under => column[y + 1..].iter().cloned().collect(),
        Relation::Above => {
            let mut set: HashSet<ObjId> = column[..y].iter().cloned().collect();
            set.insert(ObjId::from(FLOOR));
            set
        }
    }
}
