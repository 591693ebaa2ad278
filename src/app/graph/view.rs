use std::collections::HashSet;

use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Sense, Shape, Stroke, StrokeKind, Ui, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use orgflow_layout::EdgeStyle;

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, box_visible, dim_color, draw_background, kind_color, to_canvas, truncate_label,
};

const LABEL_MAX_CHARS: usize = 22;

pub(in crate::app) struct SearchMatch {
    pub id: String,
    pub label: String,
    pub score: i64,
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn search_matches(&self) -> Vec<SearchMatch> {
        let query = self.search.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let engine = self.engine.borrow();
        let mut matches = engine
            .simulation()
            .nodes()
            .iter()
            .filter_map(|node| {
                let score = fuzzy_match_score(&matcher, node.label(), query)
                    .or_else(|| fuzzy_match_score(&matcher, node.id(), query))?;
                Some(SearchMatch {
                    id: node.id().to_owned(),
                    label: node.label().to_owned(),
                    score,
                })
            })
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
        matches
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_graph_zoom(ui, &response);
        self.handle_graph_pointer(rect, &response);

        let hovered = self.hovered_node(ui, rect);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        let pseudo_matches = self
            .search_matches()
            .into_iter()
            .map(|found| found.id)
            .collect::<HashSet<_>>();
        let pseudo_active = !pseudo_matches.is_empty();

        let engine = self.engine.borrow();
        let viewport = engine.viewport();
        let simulation = engine.simulation();
        let highlight = engine.highlight();
        let extents = engine.interaction().extents();
        let scale = viewport.scale();
        let scale_sqrt = scale.sqrt();

        let origin = to_canvas(rect, viewport.world_to_screen(vec2(0.0, 0.0)));
        draw_background(&painter, rect, origin, scale);

        if simulation.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "The graph is empty.",
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        let canvas_of = |id: &str| {
            simulation
                .position(id)
                .map(|world| to_canvas(rect, viewport.world_to_screen(world)))
        };

        for edge in simulation.edges() {
            let (Some(start), Some(end)) = (canvas_of(&edge.from), canvas_of(&edge.to)) else {
                continue;
            };

            let in_component = highlight.contains_edge(&edge.id);
            let base = match edge.style {
                EdgeStyle::Plain => Color32::from_rgb(128, 138, 150),
                EdgeStyle::Emphasized => Color32::from_rgb(241, 146, 94),
            };
            let (width, color) = if highlight.is_all() {
                ((1.2 * scale_sqrt).clamp(0.6, 3.4), base)
            } else if in_component {
                (
                    (2.4 * scale_sqrt).clamp(1.2, 4.4),
                    blend_color(base, Color32::from_rgb(245, 206, 93), 0.45),
                )
            } else {
                ((0.8 * scale_sqrt).clamp(0.45, 2.0), dim_color(base, 0.35))
            };
            let width = match edge.style {
                EdgeStyle::Plain => width,
                EdgeStyle::Emphasized => width * 1.8,
            };
            let stroke = Stroke::new(width, color);

            if edge.is_self_loop() {
                let radius = (14.0 * scale).clamp(6.0, 28.0);
                painter.circle_stroke(start + vec2(0.0, -radius), radius, stroke);
                continue;
            }

            match edge.style {
                EdgeStyle::Plain => {
                    painter.line_segment([start, end], stroke);
                }
                EdgeStyle::Emphasized => {
                    painter.extend(Shape::dashed_line(&[start, end], stroke, 8.0, 5.0));
                }
            }

            let direction = (end - start).normalized();
            if direction.is_finite() {
                let mid = start + (end - start) * 0.5;
                let arrow = direction * (10.0 * scale_sqrt).clamp(6.0, 16.0);
                painter.arrow(mid - arrow * 0.5, arrow, stroke);

                if self.show_edge_labels
                    && scale > 0.6
                    && (highlight.is_all() || in_component)
                    && let Some(label) = &edge.label
                {
                    painter.text(
                        mid + vec2(0.0, -10.0),
                        Align2::CENTER_BOTTOM,
                        label,
                        FontId::proportional(11.0),
                        Color32::from_gray(190),
                    );
                }
            }
        }

        let selected = engine.selection();
        for index in engine.draw_order() {
            let node = &simulation.nodes()[index];
            let center = to_canvas(rect, viewport.world_to_screen(node.position()));
            let half = extents.half_extent(node.kind()) * scale;
            if !box_visible(rect, center, half) {
                continue;
            }

            let is_selected = selected == Some(node.id());
            let is_hovered = hovered.as_deref() == Some(node.id());
            let is_pseudo_match = pseudo_matches.contains(node.id());
            let in_component = highlight.contains_node(node.id());

            let base_color = kind_color(node.kind());
            let fill = if is_hovered {
                blend_color(base_color, Color32::WHITE, 0.25)
            } else if is_pseudo_match {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.68)
            } else if !in_component {
                dim_color(base_color, 0.38)
            } else if pseudo_active && highlight.is_all() {
                dim_color(base_color, 0.6)
            } else {
                base_color
            };

            let node_rect = egui::Rect::from_center_size(center, half * 2.0);
            let corner = CornerRadius::same((6.0 * scale).clamp(2.0, 12.0) as u8);
            painter.rect_filled(node_rect, corner, fill);

            let outline = if is_selected {
                Stroke::new(2.6, Color32::from_rgb(245, 206, 93))
            } else if node.is_pinned() {
                Stroke::new(1.8, Color32::from_gray(235))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.rect_stroke(node_rect, corner, outline, StrokeKind::Outside);

            if scale > 0.35 || is_selected || is_hovered {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    truncate_label(node.label(), LABEL_MAX_CHARS),
                    FontId::proportional((12.0 * scale_sqrt).clamp(9.0, 18.0)),
                    Color32::from_gray(245),
                );
            }
        }

        if let Some(hovered_id) = &hovered
            && let Some(node) = simulation.node(hovered_id)
        {
            let degree = simulation
                .edges()
                .iter()
                .filter(|edge| edge.from == node.id() || edge.to == node.id())
                .count();
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {}  |  links {degree}", node.label(), node.kind().label()),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}
