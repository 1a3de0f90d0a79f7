//=========================================================================
// Camera
//=========================================================================
//
// Pinhole camera used to turn the pointer into a world ray, to project
// widget axes into screen space, and to keep handles a constant size on
// screen.
//
// Conventions: right-handed, the camera looks down its local -Z, screen
// coordinates are pixels with a top-left origin.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec2, Vec3};

//=== Internal Dependencies ===============================================

use super::query::Ray;

//=== Camera ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(position: Vec3, rotation: Quat, fov_y: f32, viewport: Vec2) -> Self {
        Self {
            position,
            rotation,
            fov_y,
            viewport,
        }
    }

    /// Camera at `position` oriented to look at `target` with +Y up.
    pub fn looking_at(position: Vec3, target: Vec3, fov_y: f32, viewport: Vec2) -> Self {
        let forward = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
        let rotation = Quat::from_rotation_arc(Vec3::NEG_Z, forward);
        Self::new(position, rotation, fov_y, viewport)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    fn aspect(&self) -> f32 {
        if self.viewport.y <= 0.0 {
            1.0
        } else {
            self.viewport.x / self.viewport.y
        }
    }

    fn half_fov_tan(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }

    /// Builds the world-space ray passing through a screen pixel.
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let ndc_x = 2.0 * screen.x / self.viewport.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / self.viewport.y.max(1.0);
        let tan = self.half_fov_tan();

        let local = Vec3::new(ndc_x * tan * self.aspect(), ndc_y * tan, -1.0);
        Ray::new(self.position, self.rotation * local)
    }

    /// Projects a world point to screen pixels. `None` when the point is
    /// behind the camera.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let local = self.rotation.inverse() * (point - self.position);
        if local.z >= -f32::EPSILON {
            return None;
        }

        let depth = -local.z;
        let tan = self.half_fov_tan();
        let ndc_x = local.x / (depth * tan * self.aspect());
        let ndc_y = local.y / (depth * tan);

        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc_y) * 0.5 * self.viewport.y,
        ))
    }

    /// Screen-space direction (unit length) of a world direction drawn from
    /// `origin`. Zero when the direction points straight at the viewer.
    pub fn screen_direction(&self, origin: Vec3, direction: Vec3) -> Vec2 {
        match (
            self.world_to_screen(origin),
            self.world_to_screen(origin + direction),
        ) {
            (Some(a), Some(b)) => (b - a).normalize_or_zero(),
            _ => Vec2::ZERO,
        }
    }

    /// World-space length that covers `pixels` on screen at `point`.
    pub fn world_size_for_pixels(&self, point: Vec3, pixels: f32) -> f32 {
        let depth = (point - self.position).dot(self.forward()).max(f32::EPSILON);
        let visible_height = 2.0 * depth * self.half_fov_tan();
        visible_height * pixels / self.viewport.y.max(1.0)
    }
}

//=== CameraSource ========================================================

/// Resolves the camera used for pointer picking.
///
/// The manager resolves the camera every tick and retries once when the
/// first attempt comes back empty, so implementations may re-acquire a
/// lost camera on the second call.
pub trait CameraSource {
    fn resolve(&mut self) -> Option<Camera>;
}

impl CameraSource for Camera {
    fn resolve(&mut self) -> Option<Camera> {
        Some(*self)
    }
}

impl CameraSource for Option<Camera> {
    fn resolve(&mut self) -> Option<Camera> {
        *self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> Camera {
        Camera::looking_at(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            FRAC_PI_2,
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn center_pixel_ray_points_forward() {
        let ray = camera().screen_point_to_ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - Vec3::new(0.0, 0.0, 10.0)).length() < 1.0e-5);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1.0e-5);
    }

    #[test]
    fn projection_round_trips_through_ray() {
        let cam = camera();
        let point = Vec3::new(2.0, -1.5, 0.0);
        let screen = cam.world_to_screen(point).unwrap();
        let ray = cam.screen_point_to_ray(screen);

        let t = (point - ray.origin).dot(ray.direction);
        assert!((ray.at(t) - point).length() < 1.0e-3);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        assert!(camera().world_to_screen(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn screen_direction_of_world_up_is_screen_up() {
        let dir = camera().screen_direction(Vec3::ZERO, Vec3::Y);
        assert!((dir - Vec2::new(0.0, -1.0)).length() < 1.0e-4);
    }

    #[test]
    fn world_size_grows_with_distance() {
        let cam = camera();
        let near = cam.world_size_for_pixels(Vec3::new(0.0, 0.0, 5.0), 100.0);
        let far = cam.world_size_for_pixels(Vec3::ZERO, 100.0);
        assert!((far - 2.0 * near).abs() < 1.0e-4);
    }
}
