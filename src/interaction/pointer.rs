use bevy::prelude::*;

/// World-space ray through a viewport position. Derived fresh on every call
/// because viewport size and camera pose can change between pointer events.
pub fn viewport_ray(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Ray3d> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world(cam_tf, screen_pos).ok()
}

/// Ray for the primary pointer. An active touch takes priority over the
/// mouse cursor; both are treated identically downstream.
pub fn primary_pointer_ray(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Ray3d> {
    if let Some(touch) = touches.iter().next() {
        return viewport_ray(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    viewport_ray(camera_q, cursor)
}
