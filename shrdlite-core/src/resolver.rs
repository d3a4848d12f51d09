//! The referring-expression resolver (spec §4.1a): `find_candidates` turns
//! an `Entity` into the set of world identifiers it could denote, honouring
//! nested locative modifiers and quantifiers.

use std::collections::HashSet;

use crate::error::InterpretError;
use crate::extensor;
use crate::parsetree::{Entity, Location, Object, Quantifier};
use crate::trace::Trace;
use crate::world::{ObjId, WorldSnapshot, FLOOR};

/// Resolves `entity` against `world`, optionally limited to `restrict`.
///
/// Applies the "the" quantifier's post-check (`Ambiguous` on more than one
/// match) here, since it is a property of resolving *this* entity, whether
/// it is the command's top-level entity or one nested inside a `Location`.
/// The "empty result" check is left to callers (`compiler`), which know
/// whether an empty set means `NoSuchEntity` or simply "no clause match".
pub fn find_candidates(
    entity: &Entity,
    world: &WorldSnapshot,
    restrict: Option<&HashSet<ObjId>>,
    want_trace: bool,
) -> Result<(HashSet<ObjId>, Option<Trace>), InterpretError> {
    let (mut candidates, trace) = collect_matching(&entity.object, world, restrict, want_trace)?;
    if let Some(r) = restrict {
        candidates.retain(|id| r.contains(id));
    }
    if entity.quantifier == Quantifier::The && candidates.len() > 1 {
        return Err(InterpretError::Ambiguous);
    }
    let trace = trace.map(|inner| {
        Trace::node(
            format!(
                "{:?} -> {{{}}}",
                entity.quantifier,
                candidates
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            vec![inner],
        )
    });
    Ok((candidates, trace))
}

fn all_ids(world: &WorldSnapshot) -> HashSet<ObjId> {
    world.all_ids().cloned().collect()
}

fn collect_matching(
    obj: &Object,
    world: &WorldSnapshot,
    restrict: Option<&HashSet<ObjId>>,
    want_trace: bool,
) -> Result<(HashSet<ObjId>, Option<Trace>), InterpretError> {
    let pool = all_ids(world);
    let mut candidates: HashSet<ObjId> = match restrict {
        Some(r) => pool.intersection(r).cloned().collect(),
        None => pool,
    };
    candidates.retain(|id| matches_scalars(obj, id, world));

    if let Some(loc) = &obj.location {
        let mut kept = HashSet::new();
        let mut loc_traces = Vec::new();
        for id in candidates {
            let (ok, t) = satisfies_location(&id, loc, world, want_trace)?;
            if ok {
                kept.insert(id.clone());
            }
            if let Some(t) = t {
                loc_traces.push(t);
            }
        }
        candidates = kept;
        if want_trace {
            let trace = Trace::node(
                format!("location {:?}", loc.relation),
                loc_traces,
            );
            if let Some(inner) = &obj.object {
                let (nested, nested_trace) = intersect_with_inner(inner, world, &candidates, want_trace)?;
                candidates = nested;
                let mut children = vec![trace];
                if let Some(nt) = nested_trace {
                    children.push(nt);
                }
                return Ok((candidates, Some(Trace::node(describe(obj), children))));
            }
            return Ok((candidates, Some(Trace::node(describe(obj), vec![trace]))));
        }
    }

    if let Some(inner) = &obj.object {
        let (nested, nested_trace) = intersect_with_inner(inner, world, &candidates, want_trace)?;
        candidates = nested;
        return Ok((
            candidates,
            want_trace.then(|| Trace::node(describe(obj), nested_trace.into_iter().collect())),
        ));
    }

    Ok((
        candidates.clone(),
        want_trace.then(|| Trace::leaf(format!(
            "{} -> {{{}}}",
            describe(obj),
            candidates.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
        ))),
    ))
}

fn intersect_with_inner(
    inner: &Object,
    world: &WorldSnapshot,
    restrict: &HashSet<ObjId>,
    want_trace: bool,
) -> Result<(HashSet<ObjId>, Option<Trace>), InterpretError> {
    let (inner_candidates, trace) =
        collect_matching(inner, world, Some(restrict), want_trace)?;
    Ok((restrict.intersection(&inner_candidates).cloned().collect(), trace))
}

fn matches_scalars(obj: &Object, id: &str, world: &WorldSnapshot) -> bool {
    let props = match world.props(id) {
        Some(p) => p,
        None => return false,
    };
    if !obj.form.matches(props.form) {
        return false;
    }
    if let Some(size) = obj.size {
        if props.size != size {
            return false;
        }
    }
    if let Some(color) = obj.color {
        if props.color != Some(color) {
            return false;
        }
    }
    true
}

fn satisfies_location(
    id: &str,
    loc: &Location,
    world: &WorldSnapshot,
    want_trace: bool,
) -> Result<(bool, Option<Trace>), InterpretError> {
    let id_obj = ObjId::from(id);
    let related = extensor::related_ids(&world.stacks, world.holding.as_ref(), id, loc.relation.into());
    let (inner_candidates, inner_trace) =
        find_candidates(&loc.entity, world, Some(&related), want_trace)?;

    let ok = match loc.entity.quantifier {
        Quantifier::All => {
            !inner_candidates.is_empty() && inner_candidates.iter().all(|c| related.contains(c))
        }
        _ => !inner_candidates.is_empty(),
    };

    let trace = want_trace.then(|| {
        Trace::node(
            format!("{} {:?} ?", id_obj, loc.relation),
            inner_trace.into_iter().collect(),
        )
    });
    Ok((ok, trace))
}

fn describe(obj: &Object) -> String {
    let mut parts = Vec::new();
    if let Some(size) = obj.size {
        parts.push(format!("{:?}", size));
    }
    if let Some(color) = obj.color {
        parts.push(format!("{:?}", color));
    }
    parts.push(format!("{:?}", obj.form));
    parts.join(" ")
}

/// Convenience used by `compiler`: resolves `entity` and rejects an empty
/// result with `NoSuchEntity`.
pub fn resolve_nonempty(
    entity: &Entity,
    world: &WorldSnapshot,
    want_trace: bool,
) -> Result<(HashSet<ObjId>, Option<Trace>), InterpretError> {
    let (candidates, trace) = find_candidates(entity, world, None, want_trace)?;
    if candidates.is_empty() {
        return Err(InterpretError::NoSuchEntity);
    }
    Ok((candidates, trace))
}

pub fn is_floor(id: &str) -> bool {
    id == FLOOR
}
