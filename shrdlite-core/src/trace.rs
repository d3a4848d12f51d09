//! An optional record of the resolver's work, purely for the CLI's
//! `explain` subcommand — mirrors how `modus proof --explain` walks the SLD
//! resolution tree for the same diagnostic purpose, except here the tree is
//! built by the resolver itself rather than reconstructed from a `sld::Tree`.
//!
//! Recording costs nothing when the caller passes `None`: every call site
//! takes `Option<&mut Trace>` and the hot path (`interpret`/`heuristic`) never
//! builds one.

#[derive(Clone, Debug)]
pub struct Trace {
    pub label: String,
    pub children: Vec<Trace>,
}

impl Trace {
    pub fn leaf(label: impl Into<String>) -> Self {
        Trace {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn node(label: impl Into<String>, children: Vec<Trace>) -> Self {
        Trace {
            label: label.into(),
            children,
        }
    }
}

/// Appends `child` to `parent` if the caller is recording a trace.
pub fn record(parent: &mut Option<Trace>, child: Trace) {
    if let Some(p) = parent {
        p.children.push(child);
    }
}
