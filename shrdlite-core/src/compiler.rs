//! The goal compiler (spec §4.1b): from resolved referring expressions,
//! builds the DNF of goal literals for a `Command`, pruning physically
//! impossible relations and invalid multi-target combinations.

use std::collections::HashSet;

use crate::error::InterpretError;
use crate::feasibility::{can_support, floor_usage_valid};
use crate::logic::{Conjunction, Dnf, Literal, Relation};
use crate::parsetree::{Command, CommandKind, Quantifier};
use crate::resolver;
use crate::trace::Trace;
use crate::world::{ObjId, WorldSnapshot, FLOOR};

#[derive(Debug)]
pub struct Interpretation {
    pub dnf: Dnf,
    pub trace: Option<Trace>,
}

pub fn interpret(
    command: &Command,
    world: &WorldSnapshot,
    want_trace: bool,
) -> Result<Interpretation, InterpretError> {
    match command.command {
        CommandKind::Take => interpret_take(command, world, want_trace),
        CommandKind::Put => interpret_put(command, world, want_trace),
        CommandKind::Move => interpret_move(command, world, want_trace),
    }
}

fn interpret_take(
    command: &Command,
    world: &WorldSnapshot,
    want_trace: bool,
) -> Result<Interpretation, InterpretError> {
    let entity = command.entity.as_ref().ok_or(InterpretError::NoEntity)?;
    let (candidates, trace) = resolver::resolve_nonempty(entity, world, want_trace)?;
    if candidates.iter().any(|c| resolver::is_floor(c)) {
        return Err(InterpretError::CannotPickUpFloor);
    }
    if entity.quantifier == Quantifier::All && candidates.len() > 1 {
        return Err(InterpretError::UnsupportedAll);
    }
    let dnf: Dnf = candidates
        .into_iter()
        .map(|c| vec![Literal::positive(Relation::Holding, vec![c])])
        .collect();
    Ok(Interpretation { dnf, trace })
}

fn interpret_put(
    command: &Command,
    world: &WorldSnapshot,
    want_trace: bool,
) -> Result<Interpretation, InterpretError> {
    let held = world.holding.clone().ok_or(InterpretError::NotHolding)?;
    let location = command.location.as_ref().ok_or(InterpretError::NoLocation)?;
    let (dests, trace) = resolver::resolve_nonempty(&location.entity, world, want_trace)?;
    let relation: Relation = location.relation.into();

    let sources = vec![held];
    let dest_list: Vec<ObjId> = dests.into_iter().collect();

    let dnf = if location.entity.quantifier == Quantifier::All {
        let clauses = build_cnf(&sources, &dest_list, relation, false, true);
        cnf_to_dnf(&clauses)
    } else {
        let mut dnf = Vec::new();
        for d in &dest_list {
            if pair_is_feasible(world, &sources[0], relation, d) {
                dnf.push(vec![Literal::positive(relation, vec![sources[0].clone(), d.clone()])]);
            }
        }
        dnf
    };

    let dnf = finalize_dnf(world, dnf, relation);
    if dnf.is_empty() {
        return Err(InterpretError::NoValidSolution);
    }
    Ok(Interpretation { dnf, trace })
}

fn interpret_move(
    command: &Command,
    world: &WorldSnapshot,
    want_trace: bool,
) -> Result<Interpretation, InterpretError> {
    let entity = command.entity.as_ref().ok_or(InterpretError::NoEntity)?;
    let location = command.location.as_ref().ok_or(InterpretError::NoLocation)?;
    let (sources, src_trace) = resolver::resolve_nonempty(entity, world, want_trace)?;
    let (dests, dst_trace) = resolver::resolve_nonempty(&location.entity, world, want_trace)?;
    let relation: Relation = location.relation.into();

    let source_list: Vec<ObjId> = sources.into_iter().collect();
    let dest_list: Vec<ObjId> = dests.into_iter().collect();
    let entity_all = entity.quantifier == Quantifier::All;
    let location_all = location.entity.quantifier == Quantifier::All;

    let dnf = if !entity_all && !location_all {
        itertools::iproduct!(&source_list, &dest_list)
            .filter(|(s, d)| s != d)
            .filter(|(s, d)| pair_is_feasible(world, s, relation, d))
            .map(|(s, d)| vec![Literal::positive(relation, vec![s.clone(), d.clone()])])
            .collect()
    } else if entity_all && location_all {
        let clauses = build_cnf(&source_list, &dest_list, relation, true, true);
        let expanded = cnf_to_dnf(&clauses);
        flatten_union(expanded)
    } else {
        let clauses = build_cnf(&source_list, &dest_list, relation, entity_all, location_all);
        cnf_to_dnf(&clauses)
    };

    let dnf = finalize_dnf(world, dnf, relation);
    if dnf.is_empty() {
        return Err(InterpretError::NoValidSolution);
    }
    let trace = match (src_trace, dst_trace) {
        (Some(a), Some(b)) => Some(Trace::node("move", vec![a, b])),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };
    Ok(Interpretation { dnf, trace })
}

fn pair_is_feasible(world: &WorldSnapshot, s: &ObjId, relation: Relation, d: &ObjId) -> bool {
    let s_floor = resolver::is_floor(s);
    let d_floor = resolver::is_floor(d);
    if s_floor {
        // the floor itself can never be the thing placed.
        return false;
    }
    if !floor_usage_valid(relation, s_floor, d_floor) {
        return false;
    }
    let s_props = match world.props(s) {
        Some(p) => p,
        None => return false,
    };
    let d_props = match world.props(d) {
        Some(p) => p,
        None => return false,
    };
    can_support(s_props, relation, d_props)
}

/// Builds a CNF over `relation(s, d)` literals (spec §4.1b's move Case B):
/// one clause per source when `entity_all`, one clause per destination
/// (the "flipped" mode) when `location_all`.
fn build_cnf(
    sources: &[ObjId],
    dests: &[ObjId],
    relation: Relation,
    entity_all: bool,
    location_all: bool,
) -> Vec<Vec<Literal>> {
    let mut clauses = Vec::new();
    if entity_all {
        for s in sources {
            let disjuncts: Vec<Literal> = dests
                .iter()
                .filter(|d| *d != s)
                .map(|d| Literal::positive(relation, vec![s.clone(), d.clone()]))
                .collect();
            clauses.push(disjuncts);
        }
    }
    if location_all {
        for d in dests {
            let disjuncts: Vec<Literal> = sources
                .iter()
                .filter(|s| *s != d)
                .map(|s| Literal::positive(relation, vec![s.clone(), d.clone()]))
                .collect();
            clauses.push(disjuncts);
        }
    }
    clauses
}

/// CNF -> DNF by iterative cross product: `new = {c ∪ {l} | c ∈ cur, l ∈
/// next_clause}` (spec §4.1b). `|result| = Π|clause_i|` for non-empty
/// clauses, directly testable (spec §8).
fn cnf_to_dnf(clauses: &[Vec<Literal>]) -> Dnf {
    let mut cur: Dnf = vec![Vec::new()];
    for clause in clauses {
        if clause.is_empty() {
            return Vec::new();
        }
        let mut next = Vec::with_capacity(cur.len() * clause.len());
        for conj in &cur {
            for lit in clause {
                let mut c = conj.clone();
                c.push(lit.clone());
                next.push(c);
            }
        }
        cur = next;
    }
    cur
}

/// "All both sides" collapses to one flattened conjunction containing the
/// union (deduplicated) of all literals across all disjuncts (spec §4.1b).
fn flatten_union(dnf: Dnf) -> Dnf {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for conj in dnf {
        for lit in conj {
            let key = (lit.relation, lit.args.clone(), lit.polarity);
            if seen.insert(key) {
                merged.push(lit);
            }
        }
    }
    if merged.is_empty() {
        Vec::new()
    } else {
        vec![merged]
    }
}

/// Filters a DNF to conjunctions whose every literal is physically feasible,
/// then discards conjunctions with an invalid multi-target combination
/// (spec §4.1b's pruning rule): the same non-floor identifier used twice as
/// an `ontop`/`inside` lhs or twice as an `ontop`/`inside` rhs.
fn finalize_dnf(world: &WorldSnapshot, dnf: Dnf, _relation: Relation) -> Dnf {
    dnf.into_iter()
        .filter(|conj| conj.iter().all(|lit| literal_feasible(world, lit)))
        .filter(|conj| !has_invalid_multi_target(conj))
        .collect()
}

fn literal_feasible(world: &WorldSnapshot, lit: &Literal) -> bool {
    if lit.relation == Relation::Holding {
        return true;
    }
    pair_is_feasible(world, &lit.args[0], lit.relation, &lit.args[1])
}

fn has_invalid_multi_target(conj: &Conjunction) -> bool {
    let mut lhs_seen: HashSet<ObjId> = HashSet::new();
    let mut rhs_seen: HashSet<ObjId> = HashSet::new();
    for lit in conj {
        if !matches!(lit.relation, Relation::OnTop | Relation::Inside) {
            continue;
        }
        let lhs = &lit.args[0];
        let rhs = &lit.args[1];
        if &**lhs != FLOOR && !lhs_seen.insert(lhs.clone()) {
            return true;
        }
        if &**rhs != FLOOR && !rhs_seen.insert(rhs.clone()) {
            return true;
        }
    }
    false
}
