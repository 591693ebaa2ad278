use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{Vec2, vec2};
use serde::Deserialize;

use crate::graph::NodeKind;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub center: [f32; 2],
    /// Radius of the circle new nodes are seeded on.
    pub initial_radius: f32,
    pub charge: f32,
    pub repulsion_cutoff: f32,
    pub spring_strength: f32,
    pub ideal_length: f32,
    pub gravity: f32,
    /// Per-tick velocity retention, strictly below 1.
    pub friction: f32,
    pub max_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            initial_radius: 250.0,
            charge: 50_000.0,
            repulsion_cutoff: 600.0,
            spring_strength: 0.05,
            ideal_length: 400.0,
            gravity: 0.001,
            friction: 0.85,
            max_speed: 60.0,
        }
    }
}

impl SimulationConfig {
    pub fn center(&self) -> Vec2 {
        finite_vec(self.center, Vec2::ZERO)
    }

    pub(crate) fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let center = self.center();
        Self {
            center: [center.x, center.y],
            initial_radius: non_negative(self.initial_radius, defaults.initial_radius),
            charge: non_negative(self.charge, defaults.charge),
            repulsion_cutoff: non_negative(self.repulsion_cutoff, defaults.repulsion_cutoff),
            spring_strength: non_negative(self.spring_strength, defaults.spring_strength),
            ideal_length: non_negative(self.ideal_length, defaults.ideal_length),
            gravity: non_negative(self.gravity, defaults.gravity),
            friction: if self.friction.is_finite() {
                self.friction.clamp(0.0, 0.999)
            } else {
                defaults.friction
            },
            max_speed: if self.max_speed.is_finite() && self.max_speed > 0.0 {
                self.max_speed
            } else {
                defaults.max_speed
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_sensitivity: f32,
    pub default_offset: [f32; 2],
    pub default_scale: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 4.0,
            zoom_sensitivity: 0.001,
            default_offset: [0.0, 0.0],
            default_scale: 1.0,
        }
    }
}

impl ViewportConfig {
    /// Returns `(min, max)` with both bounds positive and ordered.
    pub fn scale_bounds(&self) -> (f32, f32) {
        let defaults = Self::default();
        let min = if self.min_scale.is_finite() && self.min_scale > 0.0 {
            self.min_scale
        } else {
            defaults.min_scale
        };
        let max = if self.max_scale.is_finite() && self.max_scale > 0.0 {
            self.max_scale
        } else {
            defaults.max_scale
        };
        (min.min(max), min.max(max))
    }

    pub fn default_offset(&self) -> Vec2 {
        finite_vec(self.default_offset, Vec2::ZERO)
    }

    pub fn default_scale(&self) -> f32 {
        let (min, max) = self.scale_bounds();
        if self.default_scale.is_finite() {
            self.default_scale.clamp(min, max)
        } else {
            1.0_f32.clamp(min, max)
        }
    }

    pub fn zoom_sensitivity(&self) -> f32 {
        if self.zoom_sensitivity.is_finite() {
            self.zoom_sensitivity.abs()
        } else {
            Self::default().zoom_sensitivity
        }
    }
}

/// Half extents of each node kind's hit box, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeExtents {
    pub team: [f32; 2],
    pub ritual: [f32; 2],
    pub input: [f32; 2],
    pub work_item: [f32; 2],
}

impl Default for NodeExtents {
    fn default() -> Self {
        Self {
            team: [72.0, 26.0],
            ritual: [76.0, 30.0],
            input: [64.0, 22.0],
            work_item: [68.0, 24.0],
        }
    }
}

impl NodeExtents {
    pub fn half_extent(&self, kind: NodeKind) -> Vec2 {
        let raw = match kind {
            NodeKind::Team => self.team,
            NodeKind::Ritual => self.ritual,
            NodeKind::Input => self.input,
            NodeKind::Initiative | NodeKind::Epic | NodeKind::Story => self.work_item,
        };
        let extent = finite_vec(raw, vec2(1.0, 1.0));
        vec2(extent.x.abs(), extent.y.abs())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub simulation: SimulationConfig,
    pub viewport: ViewportConfig,
    pub node_extents: NodeExtents,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid engine configuration JSON")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

fn non_negative(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

fn finite_vec(raw: [f32; 2], fallback: Vec2) -> Vec2 {
    let value = vec2(raw[0], raw[1]);
    if value.is_finite() { value } else { fallback }
}
