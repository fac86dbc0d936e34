use std::fmt::{Display, Write};

use ansi_term::Colour;

use crate::{
    activity::{grouping::HourBucket, ActivityError, Interval},
    dashboard::{Dashboard, QuotaStatus},
    utils::time::{date_heading, format_duration, hour_label, weekday_label},
};

const PROGRESS_BAR_WIDTH: usize = 40;
const HOURS_PER_ROW: usize = 6;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
}

impl RenderOptions {
    fn paint(&self, colour: Colour, text: &str) -> String {
        if self.color {
            colour.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn interval_cell(&self, interval: &Interval) -> String {
        match (interval.is_active, self.color) {
            (true, true) => Colour::Green.paint("■").to_string(),
            (false, true) => Colour::Fixed(240).paint("■").to_string(),
            (true, false) => "#".into(),
            (false, false) => ".".into(),
        }
    }

    fn status_badge(&self, status: QuotaStatus) -> String {
        let colour = match status {
            QuotaStatus::WithinLimits => Colour::Green,
            QuotaStatus::QuotaExceeded => Colour::Red,
        };
        self.paint(colour, &format!("[{status}]"))
    }
}

/// Quota card followed by the 24 hour timeline.
pub fn render_dashboard(dashboard: &Dashboard, options: RenderOptions) -> String {
    let record = &dashboard.record;
    let summary = &dashboard.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Device activity for {}", date_heading(dashboard.date));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Daily Quota Usage ({})  {}",
        dashboard.reset_label(),
        options.status_badge(dashboard.quota_status())
    );
    let _ = writeln!(
        out,
        "{} used / {} limit",
        format_duration(record.used_minutes()),
        format_duration(record.quota_limit_minutes())
    );

    let filled = PROGRESS_BAR_WIDTH * usize::from(dashboard.progress_width()) / 100;
    let bar_colour = if summary.is_over_quota {
        Colour::Red
    } else {
        Colour::Purple
    };
    let _ = writeln!(
        out,
        "[{}{}] {}",
        options.paint(bar_colour, &"=".repeat(filled)),
        " ".repeat(PROGRESS_BAR_WIDTH - filled),
        summary.usage_percentage
    );
    let _ = writeln!(
        out,
        "Active Time {}   Idle Time {}",
        format_duration(record.used_minutes()),
        format_duration(summary.idle_minutes)
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Activity Timeline (15m Intervals)  {} Active  {} Idle",
        options.interval_cell(&Interval::new(0, true)),
        options.interval_cell(&Interval::new(0, false)),
    );
    for row in dashboard.buckets.chunks(HOURS_PER_ROW) {
        let line = row
            .iter()
            .map(|bucket| render_bucket(bucket, options))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{line}");
    }
    out
}

fn render_bucket(bucket: &HourBucket, options: RenderOptions) -> String {
    let cells: String = bucket
        .intervals
        .iter()
        .map(|v| options.interval_cell(v))
        .collect();
    format!("{} {cells}", hour_label(bucket.hour_label))
}

/// Every interval with the text its tooltip shows.
pub fn render_intervals(dashboard: &Dashboard) -> Result<String, ActivityError> {
    let mut out = String::new();
    for interval in dashboard.record.intervals() {
        let tooltip = Dashboard::tooltip(interval)?;
        let _ = writeln!(out, "{}\t{}", tooltip.time_range, tooltip.status);
    }
    Ok(out)
}

/// One line per day: date, usage against quota and status.
pub fn render_week(week: &[Dashboard], options: RenderOptions) -> String {
    let mut out = String::new();
    for dashboard in week {
        let _ = writeln!(
            out,
            "{}\t{} / {}\t{}\t{}",
            weekday_label(dashboard.date),
            format_duration(dashboard.record.used_minutes()),
            format_duration(dashboard.record.quota_limit_minutes()),
            dashboard.summary.usage_percentage,
            options.status_badge(dashboard.quota_status())
        );
    }
    out
}

/// Shown instead of the dashboard whenever it couldn't be built.
pub fn render_error(error: &impl Display, options: RenderOptions) -> String {
    format!(
        "{} {error}",
        options.paint(Colour::Red, "Dashboard unavailable:")
    )
}
