//! Bar notifications and tooltips kept for the renderer, plus the
//! logging error reporter.

use super::{ErrorReporter, Notifier};

/// How long a bar notification stays up, in milliseconds.
const BAR_NOTIFICATION_TIME: i32 = 1500;

/// Tooltip fade-in duration, in milliseconds.
const TOOLTIP_FADE_TIME: i32 = 200;

#[derive(Debug, Default)]
pub struct BarNotifier {
    bar: Option<(String, i32)>,
    tooltip: Option<String>,
    tooltip_time: i32,
    tooltip_refreshed: bool,
}

impl BarNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bar_notification(&self) -> Option<&str> {
        self.bar.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Tooltip opacity, ramping up while the same element stays hovered.
    pub fn tooltip_alpha(&self) -> f32 {
        (self.tooltip_time as f32 / TOOLTIP_FADE_TIME as f32).min(1.0)
    }
}

impl Notifier for BarNotifier {
    fn send_bar_notification(&mut self, text: &str) {
        log::info!("MENU: {}", text);
        self.bar = Some((text.to_string(), BAR_NOTIFICATION_TIME));
    }

    fn update_tooltip(&mut self, delta: i32, text: &str, _overlap: bool) {
        if self.tooltip.as_deref() == Some(text) {
            self.tooltip_time = (self.tooltip_time + delta).min(TOOLTIP_FADE_TIME);
        } else {
            self.tooltip = Some(text.to_string());
            self.tooltip_time = 0;
        }
        self.tooltip_refreshed = true;
    }

    /// Expires the bar notification and drops tooltips not refreshed since
    /// the previous call.
    fn update(&mut self, delta: i32) {
        if let Some((_, remaining)) = self.bar.as_mut() {
            *remaining -= delta;
            if *remaining <= 0 {
                self.bar = None;
            }
        }
        if !self.tooltip_refreshed {
            self.tooltip = None;
            self.tooltip_time = 0;
        }
        self.tooltip_refreshed = false;
    }
}

/// Reports failures through the log.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, message: &str, error: &dyn std::error::Error, report_to_user: bool) {
        if report_to_user {
            log::error!("{}: {}", message, error);
        } else {
            log::warn!("{}: {}", message, error);
        }
    }
}
