use eframe::egui::Context;

use super::super::ViewModel;

const FRAME_SAMPLE_WINDOW: usize = 240;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let frame_secs = ctx.input(|input| input.unstable_dt);
        if !frame_secs.is_finite() || frame_secs <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / frame_secs).min(1000.0);
        if self.frame_times_ms.len() == FRAME_SAMPLE_WINDOW {
            self.frame_times_ms.pop_front();
        }
        self.frame_times_ms.push_back(frame_secs * 1000.0);
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        if !self.show_fps_bar || self.frame_times_ms.is_empty() {
            return None;
        }

        let mut frame_ms = self.frame_times_ms.iter().copied().collect::<Vec<_>>();
        frame_ms.sort_by(f32::total_cmp);
        let mean_ms = frame_ms.iter().sum::<f32>() / frame_ms.len() as f32;
        // Slowest 1% of recorded frames.
        let worst_ms = frame_ms[(frame_ms.len() * 99 / 100).min(frame_ms.len() - 1)];

        Some(format!(
            "FPS {:.0} | mean {:.1} ms | 1% low {:.0} FPS",
            self.fps_current,
            mean_ms,
            1000.0 / worst_ms.max(f32::EPSILON)
        ))
    }
}
