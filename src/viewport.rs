use eframe::egui::{Pos2, Vec2};

use crate::config::ViewportConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    offset: Vec2,
    scale: f32,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            offset: config.default_offset(),
            scale: config.default_scale(),
            config,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scale_bounds(&self) -> (f32, f32) {
        self.config.scale_bounds()
    }

    pub fn pan(&mut self, screen_delta: Vec2) {
        if screen_delta.is_finite() {
            self.offset += screen_delta;
        }
    }

    /// Zoom anchors at the screen origin, so the offset is left unchanged.
    pub fn zoom(&mut self, scale_delta: f32) {
        if !scale_delta.is_finite() {
            return;
        }

        let (min, max) = self.config.scale_bounds();
        let next = self.scale - scale_delta * self.config.zoom_sensitivity();
        self.scale = if next.is_finite() {
            next.clamp(min, max)
        } else {
            self.scale
        };
    }

    pub fn reset(&mut self) {
        self.offset = self.config.default_offset();
        self.scale = self.config.default_scale();
    }

    pub fn world_to_screen(&self, world: Vec2) -> Pos2 {
        (world * self.scale + self.offset).to_pos2()
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.offset) / self.scale
    }

    /// Converts a screen-space displacement (such as a pointer drag) to world units.
    pub fn screen_delta_to_world(&self, screen_delta: Vec2) -> Vec2 {
        screen_delta / self.scale
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn pan_translates_without_scaling() {
        let mut viewport = Viewport::default();
        viewport.pan(vec2(30.0, -12.0));
        viewport.pan(vec2(f32::NAN, 1.0));
        assert_eq!(viewport.offset(), vec2(30.0, -12.0));
        assert_eq!(viewport.scale(), 1.0);
    }

    #[test]
    fn positive_wheel_delta_zooms_out() {
        let mut viewport = Viewport::default();
        viewport.zoom(100.0);
        assert!((viewport.scale() - 0.9).abs() < 1e-6);
        viewport.zoom(-300.0);
        assert!((viewport.scale() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut viewport = Viewport::default();
        viewport.zoom(1e9);
        assert_eq!(viewport.scale(), 0.1);
        viewport.zoom(-1e9);
        assert_eq!(viewport.scale(), 4.0);
        viewport.zoom(f32::INFINITY);
        assert_eq!(viewport.scale(), 4.0);
    }

    #[test]
    fn zoom_is_anchored_at_origin() {
        let mut viewport = Viewport::default();
        viewport.zoom(-1000.0);
        assert_eq!(viewport.world_to_screen(Vec2::ZERO), pos2(0.0, 0.0));
        assert_eq!(viewport.world_to_screen(vec2(10.0, 5.0)), pos2(20.0, 10.0));
    }

    #[test]
    fn reset_restores_defaults() {
        let config = ViewportConfig {
            default_offset: [40.0, 20.0],
            ..ViewportConfig::default()
        };
        let mut viewport = Viewport::new(config);
        viewport.pan(vec2(5.0, 5.0));
        viewport.zoom(250.0);
        viewport.reset();
        assert_eq!(viewport.offset(), vec2(40.0, 20.0));
        assert_eq!(viewport.scale(), 1.0);
    }

    #[test]
    fn screen_and_world_transforms_are_inverse() {
        let mut viewport = Viewport::default();
        viewport.pan(vec2(120.0, -45.0));
        viewport.zoom(-750.0);

        let world = vec2(-33.5, 812.25);
        let back = viewport.screen_to_world(viewport.world_to_screen(world));
        assert!((back - world).length() < 1e-3);
    }
}
