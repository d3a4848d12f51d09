//! Top-level batch driver (spec §6.3, §7's batch semantics): given every
//! candidate parse tree for an utterance, interpret and plan each
//! independently, keep every interpretation that produced a plan, and only
//! surface an error if none of them did.

use std::time::Duration;

use crate::compiler;
use crate::config::Config;
use crate::error::{PlannerError, ShrdliteError};
use crate::graph_export::ExploredEdge;
use crate::heuristic;
use crate::logic::{dnf_to_string, Dnf};
use crate::parsetree::Command;
use crate::render;
use crate::search;
use crate::state::{outgoing, State};
use crate::world::WorldSnapshot;

#[derive(Debug)]
pub struct PlanOutcome {
    pub dnf: Dnf,
    pub plan: Vec<String>,
    pub cost: f64,
    /// Every transition A* considered while searching, for the CLI's
    /// `--graph` flag (spec §4.2 SUPPLEMENT). Empty when the goal was
    /// already satisfied in the start state, since no search ran.
    pub explored: Vec<ExploredEdge>,
}

/// Runs `interpret` then A* for a single parse tree.
pub fn plan_one(command: &Command, world: &WorldSnapshot, config: &Config) -> Result<PlanOutcome, ShrdliteError> {
    let interpretation = compiler::interpret(command, world, false)?;
    let dnf = interpretation.dnf;

    let start_state = State::initial(world);
    if heuristic::goal_satisfied(&dnf, &start_state) {
        return Ok(PlanOutcome {
            dnf,
            plan: vec!["That is already true!".to_string()],
            cost: 0.0,
            explored: Vec::new(),
        });
    }

    let timeout = Duration::from_secs_f64(config.timeout_s.max(0.0));
    let goal_dnf = dnf.clone();
    let heuristic_dnf = dnf.clone();

    let mut explored = Vec::new();
    let mut record = |from: &State, to: &State, cost: f64, action: &'static str| {
        explored.push(ExploredEdge {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
            action,
            cost,
        });
    };

    let result = search::astar(
        start_state,
        |s: &State| heuristic::goal_satisfied(&goal_dnf, s),
        |s: &State| heuristic::heuristic(&heuristic_dnf, s),
        |s: &State| {
            outgoing(s, world, config)
                .into_iter()
                .map(|(next, cost, action)| (next, cost, action.code()))
                .collect()
        },
        timeout,
        config.expanded_node_limit,
        Some(&mut record),
    );

    let search_result = match result {
        Ok(r) => r,
        Err(search::SearchHalt::TimedOut) => {
            return Err(ShrdliteError::from(PlannerError::SearchTimeout));
        }
        Err(search::SearchHalt::NodeLimitExceeded) => {
            return Err(ShrdliteError::from(PlannerError::ExpandedNodeLimitExceeded));
        }
        Err(search::SearchHalt::Exhausted) => return Err(ShrdliteError::from(PlannerError::NoPath)),
    };

    let actions: Vec<crate::state::Action> = search_result
        .actions
        .iter()
        .map(|code| match *code {
            "l" => crate::state::Action::ArmLeft,
            "r" => crate::state::Action::ArmRight,
            "p" => crate::state::Action::Pick,
            _ => crate::state::Action::Drop,
        })
        .collect();

    let plan = render::render_plan(world, &search_result.path, &actions);
    Ok(PlanOutcome {
        dnf,
        plan,
        cost: search_result.cost,
        explored,
    })
}

/// Batch semantics (spec §7): accumulate every successful interpretation
/// across `parses`; surface the first error only if none succeeded.
pub fn plan_interpretations(
    parses: &[Command],
    world: &WorldSnapshot,
    config: &Config,
) -> Result<Vec<PlanOutcome>, ShrdliteError> {
    let mut successes = Vec::new();
    let mut first_error = None;

    for command in parses {
        match plan_one(command, world, config) {
            Ok(outcome) => successes.push(outcome),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if !successes.is_empty() {
        Ok(successes)
    } else {
        Err(first_error.expect("at least one parse is required"))
    }
}

pub fn describe_dnf(dnf: &Dnf) -> String {
    dnf_to_string(dnf)
}
