//! Tunable planner constants (spec §4.2, §8). Centralised the way `modus`
//! gathers its own CLI-overridable knobs into one struct rather than scattering
//! magic numbers through `sld`/`translate` — here the numbers instead come
//! from the cost model spec lays out for the arm's four actions.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Wall-clock budget for a single search, in seconds.
    pub timeout_s: f64,
    /// Cost of moving the arm one column left or right.
    pub move_cost: f64,
    /// Base cost of picking up or putting down an object.
    pub carry_cost: f64,
    /// Additional cost applied when the held object is large.
    pub carry_large_cost: f64,
    /// Upper bound on the pick/drop cost term, reached when the target
    /// column holds every movable object in the world.
    pub max_pickup_cost: f64,
    /// Hard cap on the number of states A* expands, independent of the
    /// timeout; `None` means unbounded. A defensive ceiling, not a
    /// correctness requirement (the closed set and finite state space
    /// already guarantee termination).
    pub expanded_node_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout_s: 60.0,
            move_cost: 1.0,
            carry_cost: 2.0,
            carry_large_cost: 2.0,
            max_pickup_cost: 10.0,
            expanded_node_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.move_cost, 1.0);
        assert_eq!(cfg.move_cost + cfg.carry_cost, 3.0);
        assert_eq!(cfg.move_cost + cfg.carry_cost + cfg.carry_large_cost, 5.0);
        assert_eq!(cfg.timeout_s, 60.0);
    }
}
