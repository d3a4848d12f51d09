//! Search states and their successors (spec §4.2): the arm can step one
//! column left or right, pick up the top of the column under it, or put
//! down whatever it holds. `outgoing` enumerates every legal successor of a
//! state together with its action and cost, the same shape the
//! `plaans-aries` classical planner's `Node` generation expects from a
//! domain's successor function.

use std::rc::Rc;

use crate::config::Config;
use crate::feasibility::can_support;
use crate::logic::Relation;
use crate::world::{Form, ObjId, Size, WorldSnapshot};

/// A point in the search space: which column holds what, what (if
/// anything) the arm holds, and where the arm sits.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct State {
    pub stacks: Vec<Rc<Vec<ObjId>>>,
    pub holding: Option<ObjId>,
    pub arm: usize,
}

impl State {
    pub fn initial(world: &WorldSnapshot) -> Self {
        State {
            stacks: world.stacks.clone(),
            holding: world.holding.clone(),
            arm: world.arm,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    ArmLeft,
    ArmRight,
    Pick,
    Drop,
}

impl Action {
    pub fn code(self) -> &'static str {
        match self {
            Action::ArmLeft => "l",
            Action::ArmRight => "r",
            Action::Pick => "p",
            Action::Drop => "d",
        }
    }
}

/// Cost of a single pick or drop, interpolating between 1 (a full column,
/// nothing to dig through) and `1 + max_pickup_cost` (an empty column) as a
/// fraction of the world's `n` movable objects (spec §4.2).
fn pick_drop_cost(config: &Config, n: usize, column_height: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    1.0 + config.max_pickup_cost * (n - column_height.min(n)) as f64 / n as f64
}

fn arm_move_cost(config: &Config, holding: Option<&ObjId>, world: &WorldSnapshot) -> f64 {
    let mut cost = config.move_cost;
    if let Some(id) = holding {
        cost += config.carry_cost;
        if world.props(id).map(|p| p.size == Size::Large).unwrap_or(false) {
            cost += config.carry_large_cost;
        }
    }
    cost
}

/// Every legal successor of `state`: one or two arm steps, a pick if the
/// arm is empty and the column under it is non-empty, a drop if the arm is
/// full and dropping there is physically feasible.
pub fn outgoing(state: &State, world: &WorldSnapshot, config: &Config) -> Vec<(State, f64, Action)> {
    let mut out = Vec::new();
    let n = world.object_count();

    if state.arm > 0 {
        let mut next = state.clone();
        next.arm -= 1;
        let cost = arm_move_cost(config, state.holding.as_ref(), world);
        out.push((next, cost, Action::ArmLeft));
    }
    if state.arm + 1 < state.stacks.len() {
        let mut next = state.clone();
        next.arm += 1;
        let cost = arm_move_cost(config, state.holding.as_ref(), world);
        out.push((next, cost, Action::ArmRight));
    }

    if state.holding.is_none() {
        if let Some(column) = state.stacks.get(state.arm) {
            if let Some(top) = column.last().cloned() {
                let mut next = state.clone();
                let mut new_column = (**column).clone();
                new_column.pop();
                next.stacks[state.arm] = Rc::new(new_column);
                next.holding = Some(top);
                let cost = pick_drop_cost(config, n, column.len());
                out.push((next, cost, Action::Pick));
            }
        }
    } else if let Some(held) = state.holding.clone() {
        if let Some(column) = state.stacks.get(state.arm) {
            if drop_is_feasible(world, &held, column.last()) {
                let mut next = state.clone();
                let mut new_column = (**column).clone();
                new_column.push(held);
                next.stacks[state.arm] = Rc::new(new_column);
                next.holding = None;
                let cost = pick_drop_cost(config, n, column.len());
                out.push((next, cost, Action::Drop));
            }
        }
    }

    out
}

/// Per spec §4.2: an empty column always accepts a drop; a non-empty one
/// requires `can_support`, judged as `inside` when the object underneath is
/// a box and `ontop` otherwise.
fn drop_is_feasible(world: &WorldSnapshot, held: &ObjId, top_of_column: Option<&ObjId>) -> bool {
    let held_props = match world.props(held) {
        Some(p) => p,
        None => return false,
    };
    let rhs = match top_of_column {
        None => return true,
        Some(rhs) => rhs,
    };
    let rhs_props = match world.props(rhs) {
        Some(p) => p,
        None => return false,
    };
    let rel = if rhs_props.form == Form::Box {
        Relation::Inside
    } else {
        Relation::OnTop
    };
    can_support(held_props, rel, rhs_props)
}
