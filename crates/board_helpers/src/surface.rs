//! Mapping between Bevy world space and a fixed drawing surface.
//!
//! Surface coordinates put the origin at the top-left corner with `y`
//! growing downwards, the way a browser canvas addresses its pixels. The
//! surface is centered on the world origin.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub size: Vec2,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn to_world(&self, position: Vec2) -> Vec2 {
        let half = self.size / 2.0;
        Vec2::new(position.x - half.x, half.y - position.y)
    }

    pub fn to_surface(&self, world: Vec2) -> Vec2 {
        let half = self.size / 2.0;
        Vec2::new(world.x + half.x, half.y - world.y)
    }

    /// Translation for an entity whose center sits at `position`.
    pub fn translation(&self, position: Vec2, z: f32) -> Vec3 {
        self.to_world(position).extend(z)
    }
}

/// Spawns a 2D camera that keeps the whole surface in view whatever the window size.
pub fn spawn_surface_camera(mut commands: Commands, surface: Res<Surface>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: surface.size.x,
                min_height: surface.size.y,
            },
            ..OrthographicProjection::default_2d()
        },
    ));
}
