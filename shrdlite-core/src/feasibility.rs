//! The physical feasibility predicate (spec §3.5): a closed truth table,
//! independent of where objects currently sit. `can_support` answers "could
//! these two things ever stand in this relation", not "do they right now".

use crate::logic::Relation;
use crate::world::{Form, ObjectProps, Size};

/// `true` iff `lhs` could physically be placed in `rel` to `rhs`.
pub fn can_support(lhs: &ObjectProps, rel: Relation, rhs: &ObjectProps) -> bool {
    match rel {
        Relation::OnTop => can_support_ontop(lhs, rhs),
        Relation::Inside => can_support_inside(lhs, rhs),
        Relation::Above => can_support_above(lhs, rhs),
        Relation::Under => can_support_above(rhs, lhs),
        Relation::LeftOf | Relation::RightOf | Relation::Beside => true,
        Relation::Holding => true,
    }
}

fn can_support_ontop(lhs: &ObjectProps, rhs: &ObjectProps) -> bool {
    if matches!(rhs.form, Form::Box | Form::Ball) {
        return false;
    }
    if lhs.form == Form::Ball && rhs.form != Form::Floor {
        return false;
    }
    if lhs.size == Size::Large && rhs.size == Size::Small {
        return false;
    }
    if lhs.form == Form::Box
        && rhs.size == Size::Small
        && matches!(rhs.form, Form::Brick | Form::Pyramid)
    {
        return false;
    }
    if lhs.form == Form::Box && lhs.size == Size::Large && rhs.form == Form::Pyramid {
        return false;
    }
    true
}

fn can_support_inside(lhs: &ObjectProps, rhs: &ObjectProps) -> bool {
    if rhs.form != Form::Box {
        return false;
    }
    if lhs.size != rhs.size && !matches!(lhs.form, Form::Ball | Form::Brick | Form::Table) {
        return false;
    }
    if rhs.size == Size::Small && lhs.size == Size::Large {
        return false;
    }
    true
}

fn can_support_above(lhs: &ObjectProps, rhs: &ObjectProps) -> bool {
    if rhs.form == Form::Ball {
        return false;
    }
    if lhs.size == Size::Large && rhs.size == Size::Small {
        return false;
    }
    true
}

/// Where the floor sentinel is allowed to appear (spec §3.5's closing
/// paragraph). Anything else involving the floor is a hard error, not merely
/// infeasible.
pub fn floor_usage_valid(relation: Relation, lhs_is_floor: bool, rhs_is_floor: bool) -> bool {
    if rhs_is_floor && !matches!(relation, Relation::OnTop | Relation::Above) {
        return false;
    }
    if lhs_is_floor && relation != Relation::Under {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(form: Form, size: Size) -> ObjectProps {
        ObjectProps {
            form,
            size,
            color: None,
        }
    }

    #[test]
    fn ball_only_ontop_floor() {
        let ball = obj(Form::Ball, Size::Small);
        let floor = obj(Form::Floor, Size::Large);
        let table = obj(Form::Table, Size::Large);
        assert!(can_support(&ball, Relation::OnTop, &floor));
        assert!(!can_support(&ball, Relation::OnTop, &table));
    }

    #[test]
    fn nothing_ontop_box_or_ball() {
        let brick = obj(Form::Brick, Size::Small);
        let box_ = obj(Form::Box, Size::Small);
        let ball = obj(Form::Ball, Size::Small);
        assert!(!can_support(&brick, Relation::OnTop, &box_));
        assert!(!can_support(&brick, Relation::OnTop, &ball));
    }

    #[test]
    fn large_never_ontop_small() {
        let large = obj(Form::Brick, Size::Large);
        let small = obj(Form::Plank, Size::Small);
        assert!(!can_support(&large, Relation::OnTop, &small));
    }

    #[test]
    fn small_box_cannot_hold_small_brick_or_pyramid_ontop() {
        let small_box = obj(Form::Box, Size::Small);
        let small_brick = obj(Form::Brick, Size::Small);
        let small_pyramid = obj(Form::Pyramid, Size::Small);
        let small_plank = obj(Form::Plank, Size::Small);
        assert!(!can_support(&small_box, Relation::OnTop, &small_brick));
        assert!(!can_support(&small_box, Relation::OnTop, &small_pyramid));
        assert!(can_support(&small_box, Relation::OnTop, &small_plank));
    }

    #[test]
    fn large_box_cannot_go_ontop_pyramid() {
        let large_box = obj(Form::Box, Size::Large);
        let pyramid = obj(Form::Pyramid, Size::Large);
        assert!(!can_support(&large_box, Relation::OnTop, &pyramid));
    }

    #[test]
    fn inside_requires_box() {
        let ball = obj(Form::Ball, Size::Small);
        let table = obj(Form::Table, Size::Small);
        let box_ = obj(Form::Box, Size::Large);
        assert!(!can_support(&ball, Relation::Inside, &table));
        assert!(can_support(&ball, Relation::Inside, &box_));
    }

    #[test]
    fn inside_size_rules() {
        let large_ball = obj(Form::Ball, Size::Large);
        let small_box = obj(Form::Box, Size::Small);
        let small_brick = obj(Form::Brick, Size::Small);
        let large_box = obj(Form::Box, Size::Large);
        // large lhs never fits in a small box, even though ball is exempt
        // from the general same-size rule.
        assert!(!can_support(&large_ball, Relation::Inside, &small_box));
        assert!(can_support(&small_brick, Relation::Inside, &large_box));
    }

    #[test]
    fn under_is_above_flipped() {
        let a = obj(Form::Brick, Size::Small);
        let b = obj(Form::Table, Size::Large);
        assert_eq!(
            can_support(&a, Relation::Under, &b),
            can_support(&b, Relation::Above, &a)
        );
    }

    #[test]
    fn floor_usage() {
        assert!(floor_usage_valid(Relation::OnTop, false, true));
        assert!(floor_usage_valid(Relation::Above, false, true));
        assert!(!floor_usage_valid(Relation::Inside, false, true));
        assert!(floor_usage_valid(Relation::Under, true, false));
        assert!(!floor_usage_valid(Relation::OnTop, true, false));
    }
}
