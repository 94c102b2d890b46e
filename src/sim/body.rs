//! Shared physical state for every mobile entity
//!
//! A body is an axis-aligned square: `pos` is its top-left corner and
//! `size` its side length. Collision treats it as a circle of radius
//! `size / 2` around `center()`.

use glam::Vec2;

use crate::center_of;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Cleared when the entity should be compacted out of its pool
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            alive: true,
        }
    }

    /// Body of `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center - Vec2::splat(size / 2.0), size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        center_of(self.pos, self.size)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Integrate one tick of linear motion, then clamp into the field
    pub fn update(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.clamp_to(bounds);
    }

    /// Clamp each axis into `[0, bound - size]`
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let max = (bounds - Vec2::splat(self.size)).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    /// True if the body lies inside the field
    pub fn in_bounds(&self, bounds: Vec2) -> bool {
        self.pos.x >= 0.0
            && self.pos.y >= 0.0
            && self.pos.x <= bounds.x - self.size
            && self.pos.y <= bounds.y - self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_update_integrates_velocity() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), 10.0);
        body.vel = Vec2::new(3.0, -2.0);
        body.update(BOUNDS);
        assert_eq!(body.pos, Vec2::new(103.0, 98.0));
    }

    #[test]
    fn test_update_clamps_low_edge() {
        let mut body = Body::new(Vec2::new(1.0, 1.0), 10.0);
        body.vel = Vec2::new(-5.0, -5.0);
        body.update(BOUNDS);
        assert_eq!(body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_update_clamps_high_edge_accounts_for_size() {
        let mut body = Body::new(Vec2::new(785.0, 585.0), 10.0);
        body.vel = Vec2::new(50.0, 50.0);
        body.update(BOUNDS);
        assert_eq!(body.pos, Vec2::new(790.0, 590.0));
        assert!(body.in_bounds(BOUNDS));
    }

    #[test]
    fn test_centered() {
        let body = Body::centered(Vec2::new(50.0, 50.0), 20.0);
        assert_eq!(body.pos, Vec2::new(40.0, 40.0));
        assert_eq!(body.center(), Vec2::new(50.0, 50.0));
    }
}
