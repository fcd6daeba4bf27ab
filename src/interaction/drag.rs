use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{PartBounds, Returning, Shape};
use crate::core::config::GameConfig;
use crate::core::system::system_order::InputSet;
use crate::interaction::pick::{ray_plane_intersection, resolve_pick};
use crate::interaction::pointer::primary_pointer_ray;

pub struct DragPlugin;

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveDrag::default())
            .add_event::<DragReleased>()
            .add_systems(
                Update,
                (begin_drag, continue_drag, end_drag)
                    .chain()
                    .in_set(InputSet)
                    .run_if(in_state(AppState::Active)),
            )
            .add_systems(OnExit(AppState::Active), clear_drag);
    }
}

/// The single held shape, if any. All drag systems funnel through the
/// guarded transitions below so rapid multi-touch can never hold two.
#[derive(Resource, Default, Debug)]
pub struct ActiveDrag {
    held: Option<Entity>,
}

impl ActiveDrag {
    /// Take hold of a picked shape. Refused (returns false) when nothing was
    /// picked or something is already held.
    pub fn try_begin(&mut self, pick: Option<Entity>) -> bool {
        match (self.held, pick) {
            (None, Some(e)) => {
                self.held = Some(e);
                true
            }
            _ => false,
        }
    }

    pub fn held(&self) -> Option<Entity> {
        self.held
    }

    /// Surrender the held shape to the caller and clear the hold. Match
    /// evaluation is the caller's job, never this controller's.
    pub fn release(&mut self) -> Option<Entity> {
        self.held.take()
    }

    /// Drop the hold without handing the shape to anyone (despawned under us).
    pub fn forget(&mut self) {
        self.held = None;
    }
}

/// Fired on pointer release while a shape was held; consumed by match
/// evaluation the same frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct DragReleased {
    pub entity: Entity,
}

fn pressed_now(buttons: &ButtonInput<MouseButton>, touches: &Touches) -> bool {
    buttons.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some()
}

fn released_now(buttons: &ButtonInput<MouseButton>, touches: &Touches) -> bool {
    buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some()
}

fn begin_drag(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut active: ResMut<ActiveDrag>,
    parts_q: Query<(&ChildOf, &GlobalTransform, &PartBounds)>,
    roots_q: Query<(), With<Shape>>,
) {
    if !pressed_now(&buttons, &touches) {
        return;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(ray) = primary_pointer_ray(window, &touches, &camera_q) else {
        return;
    };
    // Pick against every part sphere; the hit resolves to its compound root.
    let candidates = parts_q.iter().filter_map(|(child_of, tf, bounds)| {
        let root = child_of.parent();
        roots_q
            .get(root)
            .ok()
            .map(|_| (root, tf.translation(), bounds.0))
    });
    let pick = resolve_pick(&ray, candidates).map(|(root, _)| root);
    if active.try_begin(pick) {
        if let Some(e) = active.held() {
            commands.entity(e).remove::<Returning>();
        }
    }
}

fn continue_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    active: Res<ActiveDrag>,
    mut shapes_q: Query<&mut Transform, With<Shape>>,
    cfg: Res<GameConfig>,
) {
    let Some(held) = active.held() else {
        return;
    };
    if !(buttons.pressed(MouseButton::Left) || touches.iter().next().is_some()) {
        return;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(ray) = primary_pointer_ray(window, &touches, &camera_q) else {
        return;
    };
    let Ok(mut tf) = shapes_q.get_mut(held) else {
        return;
    };
    // One shared drag plane for every drag, not the shape's own depth.
    let plane_origin = Vec3::new(0.0, 0.0, cfg.drag.plane_depth);
    if let Some(hit) = ray_plane_intersection(&ray, plane_origin, Vec3::Z) {
        tf.translation = hit;
        tf.translation.z = cfg.drag.lift_depth;
    }
    // Parallel ray: position stays put for this frame, spin still applies.
    tf.rotate_x(cfg.drag.spin_x);
    tf.rotate_z(cfg.drag.spin_z);
}

// A round can end mid-drag (countdown expiry); never carry a hold across rounds.
fn clear_drag(mut active: ResMut<ActiveDrag>) {
    active.forget();
}

fn end_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut active: ResMut<ActiveDrag>,
    mut released: EventWriter<DragReleased>,
) {
    if !released_now(&buttons, &touches) {
        return;
    }
    if let Some(entity) = active.release() {
        released.write(DragReleased { entity });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pick_is_a_no_op() {
        let mut drag = ActiveDrag::default();
        assert!(!drag.try_begin(None));
        assert!(drag.held().is_none());
    }

    #[test]
    fn second_press_while_held_is_refused() {
        let mut drag = ActiveDrag::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        assert!(drag.try_begin(Some(a)));
        assert!(!drag.try_begin(Some(b)));
        assert_eq!(drag.held(), Some(a));
    }

    #[test]
    fn release_clears_and_hands_back() {
        let mut drag = ActiveDrag::default();
        let a = Entity::from_raw(7);
        drag.try_begin(Some(a));
        assert_eq!(drag.release(), Some(a));
        assert_eq!(drag.release(), None);
    }
}
