//! Plan rendering (spec §4.5–4.6): turn a path of search states into the
//! output action/utterance stream, describing the manipulated object with
//! the shortest phrase that is unambiguous given what else is in the world.

use crate::state::{Action, State};
use crate::world::{ObjId, WorldSnapshot};

const ALREADY_TRUE: &str = "That is already true!";

/// Renders `path`/`actions` (as returned by `search::astar`) into the
/// output token stream (spec §6.2): primitive codes interleaved with
/// templated utterances, or the single already-true message for an empty
/// plan.
pub fn render_plan(world: &WorldSnapshot, path: &[State], actions: &[Action]) -> Vec<String> {
    if actions.is_empty() {
        return vec![ALREADY_TRUE.to_string()];
    }

    let mut out = Vec::new();
    let last_pick_index = actions.iter().rposition(|a| *a == Action::Pick);
    let mut segment_announced = false;

    for (i, action) in actions.iter().enumerate() {
        let before = &path[i];
        match action {
            Action::ArmLeft => out.push("l".to_string()),
            Action::ArmRight => out.push("r".to_string()),
            Action::Pick => {
                let id = before.stacks[before.arm].last().expect("pick requires a non-empty column");
                let desc = shortest_description(world, id);
                let verb = if Some(i) == last_pick_index { "Taking" } else { "Moving" };
                out.push(format!("{} the {}", verb, desc));
                out.push("p".to_string());
                segment_announced = true;
            }
            Action::Drop => {
                if !segment_announced {
                    let id = before.holding.as_ref().expect("drop requires something held");
                    let desc = shortest_description(world, id);
                    out.push(format!("Dropping the {}", desc));
                }
                out.push("d".to_string());
                segment_announced = false;
            }
        }
    }
    out
}

/// The shortest property tuple that uniquely identifies `id` among every
/// object present anywhere in `world` (spec §4.6): try `[form]`, then
/// `[color, form]`, then `[size, form]`; fall back to `[size, color, form]`
/// if none of those disambiguate.
pub fn shortest_description(world: &WorldSnapshot, id: &str) -> String {
    let props = match world.props(id) {
        Some(p) => p,
        None => return id.to_string(),
    };

    let form_only = |other: &crate::world::ObjectProps| other.form == props.form;
    if is_unique(world, id, form_only) {
        return format!("{:?}", props.form).to_lowercase();
    }

    let color_form = |other: &crate::world::ObjectProps| other.form == props.form && other.color == props.color;
    if props.color.is_some() && is_unique(world, id, color_form) {
        return format!(
            "{:?} {:?}",
            props.color.unwrap(),
            props.form
        )
        .to_lowercase();
    }

    let size_form = |other: &crate::world::ObjectProps| other.form == props.form && other.size == props.size;
    if is_unique(world, id, size_form) {
        return format!("{:?} {:?}", props.size, props.form).to_lowercase();
    }

    format!("{:?} {:?} {:?}", props.size, props.color, props.form).to_lowercase()
}

fn is_unique(world: &WorldSnapshot, id: &str, matches: impl Fn(&crate::world::ObjectProps) -> bool) -> bool {
    let present: std::collections::HashSet<&ObjId> = world
        .stacks
        .iter()
        .flat_map(|c| c.iter())
        .chain(world.holding.iter())
        .collect();
    present
        .iter()
        .filter(|other_id| other_id.as_ref() != id)
        .filter(|other_id| world.props(other_id).map(|p| matches(p)).unwrap_or(false))
        .count()
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Color, Form, ObjectProps, RawWorld, Size};
    use std::collections::HashMap;
    use std::rc::Rc;

    fn world() -> WorldSnapshot {
        let mut objects = HashMap::new();
        objects.insert("floor".to_string(), ObjectProps { form: Form::Floor, size: Size::Large, color: None });
        objects.insert("l".to_string(), ObjectProps { form: Form::Ball, size: Size::Small, color: Some(Color::White) });
        objects.insert("m".to_string(), ObjectProps { form: Form::Ball, size: Size::Small, color: Some(Color::Red) });
        let raw = RawWorld {
            stacks: vec![vec!["l".to_string()], vec!["m".to_string()]],
            holding: None,
            arm: 0,
            objects,
        };
        WorldSnapshot::try_new(raw).unwrap()
    }

    #[test]
    fn empty_plan_renders_already_true() {
        let w = world();
        let out = render_plan(&w, &[], &[]);
        assert_eq!(out, vec![ALREADY_TRUE.to_string()]);
    }

    #[test]
    fn form_alone_is_used_when_unique() {
        let mut objects = HashMap::new();
        objects.insert("floor".to_string(), ObjectProps { form: Form::Floor, size: Size::Large, color: None });
        objects.insert("k".to_string(), ObjectProps { form: Form::Box, size: Size::Large, color: Some(Color::Yellow) });
        let raw = RawWorld {
            stacks: vec![vec!["k".to_string()]],
            holding: None,
            arm: 0,
            objects,
        };
        let w = WorldSnapshot::try_new(raw).unwrap();
        assert_eq!(shortest_description(&w, "k"), "box");
    }

    #[test]
    fn color_disambiguates_two_balls() {
        let w = world();
        assert_eq!(shortest_description(&w, "l"), "white ball");
        assert_eq!(shortest_description(&w, "m"), "red ball");
    }

    #[test]
    fn take_then_drop_produces_taking_and_dropping_utterances() {
        let w = world();
        let s0 = State { stacks: w.stacks.clone(), holding: None, arm: 0 };
        let mut s1 = s0.clone();
        s1.stacks[0] = Rc::new(vec![]);
        s1.holding = Some(ObjId::from("l"));
        let mut s2 = s1.clone();
        s2.arm = 1;
        let mut s3 = s2.clone();
        s3.holding = None;
        s3.stacks[1] = Rc::new(vec![ObjId::from("m"), ObjId::from("l")]);

        let path = vec![s0, s1, s2, s3];
        let actions = vec![Action::Pick, Action::ArmRight, Action::Drop];
        let out = render_plan(&w, &path, &actions);
        assert_eq!(
            out,
            vec![
                "Taking the white ball".to_string(),
                "p".to_string(),
                "r".to_string(),
                "d".to_string(),
            ]
        );
    }
}
