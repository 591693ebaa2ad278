use eframe::egui::Vec2;

use crate::util::fallback_direction;

const COINCIDENT_DISTANCE_SQ: f32 = 1e-8;

/// Inverse-square push between every pair closer than `cutoff`.
pub(super) fn accumulate_repulsion(
    positions: &[Vec2],
    free: &[bool],
    charge: f32,
    cutoff: f32,
    deltas: &mut [Vec2],
) {
    if charge <= 0.0 {
        return;
    }

    let cutoff_sq = cutoff * cutoff;
    for from in 0..positions.len() {
        for to in (from + 1)..positions.len() {
            if !free[from] && !free[to] {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance_sq = delta.length_sq();
            if distance_sq > cutoff_sq {
                continue;
            }

            let direction = if distance_sq > COINCIDENT_DISTANCE_SQ {
                delta / distance_sq.sqrt()
            } else {
                fallback_direction(from, to)
            };
            let push = direction * (charge / distance_sq.max(1.0));

            if free[from] {
                deltas[from] += push;
            }
            if free[to] {
                deltas[to] -= push;
            }
        }
    }
}

/// Hooke spring along each resolved edge, pulling endpoints toward `ideal_length`.
pub(super) fn accumulate_springs(
    positions: &[Vec2],
    free: &[bool],
    springs: &[(usize, usize)],
    strength: f32,
    ideal_length: f32,
    deltas: &mut [Vec2],
) {
    if strength <= 0.0 {
        return;
    }

    for &(from, to) in springs {
        if from == to || from >= positions.len() || to >= positions.len() {
            continue;
        }

        let delta = positions[to] - positions[from];
        let distance_sq = delta.length_sq();
        let (direction, distance) = if distance_sq > COINCIDENT_DISTANCE_SQ {
            let distance = distance_sq.sqrt();
            (delta / distance, distance)
        } else {
            (fallback_direction(from, to), 0.0)
        };

        let pull = direction * (strength * (distance - ideal_length));
        if free[from] {
            deltas[from] += pull;
        }
        if free[to] {
            deltas[to] -= pull;
        }
    }
}

/// Weak pull toward `center` so disconnected components stay on the canvas.
pub(super) fn accumulate_gravity(
    positions: &[Vec2],
    free: &[bool],
    center: Vec2,
    gravity: f32,
    deltas: &mut [Vec2],
) {
    for (index, delta) in deltas.iter_mut().enumerate() {
        if free[index] {
            *delta += (center - positions[index]) * gravity;
        }
    }
}
