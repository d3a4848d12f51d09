//! The intermediate language of the planner: goal literals and the DNF
//! formula built from them (spec §3.2–§3.3). Shaped after `modus`'s own
//! `Literal`/`Clause` pair in `logic.rs` — a plain, `Display`-able structural
//! value with no behaviour baked in, left for `compiler`/`heuristic` to
//! interpret.

use std::fmt;

use crate::world::ObjId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Relation {
    Holding,
    OnTop,
    Inside,
    Above,
    Under,
    LeftOf,
    RightOf,
    Beside,
}

impl Relation {
    pub fn arity(self) -> usize {
        match self {
            Relation::Holding => 1,
            _ => 2,
        }
    }

    /// `under(a, b) == above(b, a)` (spec §3.5); used by both the
    /// feasibility table and the heuristic to avoid duplicating the
    /// `above` logic.
    pub fn flip(self) -> Option<Relation> {
        match self {
            Relation::Under => Some(Relation::Above),
            Relation::Above => Some(Relation::Under),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relation::Holding => "holding",
            Relation::OnTop => "ontop",
            Relation::Inside => "inside",
            Relation::Above => "above",
            Relation::Under => "under",
            Relation::LeftOf => "leftof",
            Relation::RightOf => "rightof",
            Relation::Beside => "beside",
        };
        write!(f, "{}", name)
    }
}

/// One relational atom with polarity (spec §3.2). `polarity` is always
/// `true` for goals produced by today's compiler (§4.1b never emits a
/// negated literal) but both the goal test and the heuristic honour it, so
/// the field is not dead weight if a future NL extension starts emitting
/// negation.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    pub polarity: bool,
    pub relation: Relation,
    pub args: Vec<ObjId>,
}

impl Literal {
    pub fn positive(relation: Relation, args: Vec<ObjId>) -> Self {
        debug_assert_eq!(args.len(), relation.arity());
        Literal {
            polarity: true,
            relation,
            args,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "!")?;
        }
        write!(f, "{}(", self.relation)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// A conjunction of literals, all of which must hold.
pub type Conjunction = Vec<Literal>;

/// A disjunction of conjunctions (spec §3.3): satisfied iff any one of the
/// conjunctions is. An empty `Dnf` means "no interpretation".
pub type Dnf = Vec<Conjunction>;

pub fn dnf_to_string(dnf: &Dnf) -> String {
    dnf.iter()
        .map(|conj| {
            conj.iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ObjId {
        ObjId::from(s)
    }

    #[test]
    fn displays_positive_literal() {
        let l = Literal::positive(Relation::Holding, vec![id("k")]);
        assert_eq!(l.to_string(), "holding(k)");
    }

    #[test]
    fn displays_binary_literal() {
        let l = Literal::positive(Relation::Inside, vec![id("l"), id("k")]);
        assert_eq!(l.to_string(), "inside(l, k)");
    }

    #[test]
    fn under_above_flip() {
        assert_eq!(Relation::Under.flip(), Some(Relation::Above));
        assert_eq!(Relation::Above.flip(), Some(Relation::Under));
        assert_eq!(Relation::OnTop.flip(), None);
    }
}
