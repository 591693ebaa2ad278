use eframe::egui::{Vec2, vec2};

/// Deterministic unit direction used when two points coincide.
pub(crate) fn fallback_direction(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

pub(crate) fn clamp_length(value: Vec2, max_length: f32) -> Vec2 {
    let length_sq = value.length_sq();
    if length_sq > max_length * max_length {
        value * (max_length / length_sq.sqrt())
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_direction_is_unit_length() {
        for (from, to) in [(0, 1), (3, 7), (12, 2)] {
            assert!((fallback_direction(from, to).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn clamp_length_only_shrinks_long_vectors() {
        assert_eq!(clamp_length(vec2(3.0, 4.0), 10.0), vec2(3.0, 4.0));
        assert!((clamp_length(vec2(30.0, 40.0), 10.0).length() - 10.0).abs() < 1e-4);
    }
}
