use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use orgflow_layout::NodeKind;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, origin: Pos2, scale: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * scale.clamp(0.6, 1.8)).max(20.0);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            stroke,
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
        );
        y += step;
    }
}

// Engine screen space has its origin at the canvas center.
pub(super) fn to_canvas(rect: Rect, local: Pos2) -> Pos2 {
    rect.center() + local.to_vec2()
}

pub(super) fn to_local(rect: Rect, pointer: Pos2) -> Pos2 {
    (pointer - rect.center()).to_pos2()
}

pub(super) fn box_visible(rect: Rect, center: Pos2, half: Vec2) -> bool {
    rect.intersects(Rect::from_center_size(center, half * 2.0))
}

pub(super) fn kind_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Team => Color32::from_rgb(86, 140, 222),
        NodeKind::Ritual => Color32::from_rgb(160, 112, 214),
        NodeKind::Input => Color32::from_rgb(226, 116, 96),
        NodeKind::Initiative => Color32::from_rgb(232, 170, 72),
        NodeKind::Epic => Color32::from_rgb(214, 138, 190),
        NodeKind::Story => Color32::from_rgb(92, 184, 142),
    }
}

pub(super) fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }

    let mut truncated = label
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    truncated.push('…');
    truncated
}
