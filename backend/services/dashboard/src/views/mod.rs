//! Page view models and their terminal rendering.
//!
//! Each page turns API payloads into chart series (label, value, colour) and
//! renders them as text: horizontal bars for bar and pie charts, `tabled`
//! tables for per-row metrics.

pub mod access_impact;
pub mod alerts;
pub mod overview;
pub mod productivity;
pub mod realtime;
pub mod work_location;

use colored::{ColoredString, Colorize};

const BAR_WIDTH: usize = 32;

pub trait Page: Send {
    type Data: Send + 'static;

    fn title(&self) -> &'static str;

    /// Fold one fetch outcome into the page.
    fn apply(&mut self, result: Result<Self::Data, String>);

    fn render(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

impl ChartEntry {
    pub fn new(label: impl Into<String>, value: f64, color: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// `#rrggbb` to a truecolor span; anything else is left uncoloured.
pub fn paint(text: &str, hex: &str) -> ColoredString {
    match parse_hex(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// One line per entry, bars scaled to the largest value.
pub fn bar_chart(entries: &[ChartEntry]) -> String {
    let max = entries
        .iter()
        .map(|e| e.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let label_width = entries.iter().map(|e| e.label.len()).max().unwrap_or(0);

    entries
        .iter()
        .map(|e| {
            let filled = if max > 0.0 && e.value.is_finite() && e.value > 0.0 {
                ((e.value / max) * BAR_WIDTH as f64).round().max(1.0) as usize
            } else {
                0
            };
            format!(
                "  {:<label_width$}  {} {}",
                e.label,
                paint(&"█".repeat(filled), e.color),
                format_number(e.value),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Share of each entry in the total, like a pie legend.
pub fn pie_legend(entries: &[ChartEntry]) -> String {
    let total: f64 = entries.iter().map(|e| e.value).sum();
    entries
        .iter()
        .map(|e| {
            let pct = share(e.value, total)
                .map(|s| format!("{:.1}%", s * 100.0))
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "  {} {}: {} ({pct})",
                paint("●", e.color),
                e.label,
                format_number(e.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `part / total`, or `None` when the total is zero or not a number.
pub fn share(part: f64, total: f64) -> Option<f64> {
    if total > 0.0 && total.is_finite() && part.is_finite() {
        Some(part / total)
    } else {
        None
    }
}

/// Two decimals; `NaN` stays visible as `NaN`.
pub fn fixed2(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Whole numbers get thousands separators (`1,234`); fractions two decimals.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        let n = value as i64;
        let digits = n.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if n < 0 {
            format!("-{grouped}")
        } else {
            grouped
        }
    } else {
        fixed2(value)
    }
}

/// Header line shared by the polling pages.
pub fn status_line(live: bool, next_sync_secs: u64) -> String {
    if live {
        format!(
            "{} Live Feed   Sync in: {next_sync_secs}s   (p + Enter to pause)",
            "●".green()
        )
    } else {
        format!("{} Paused   (p + Enter to resume)", "○".dimmed())
    }
}

pub fn heading(title: &str) -> String {
    format!("{}\n{}", title.bold(), "─".repeat(title.chars().count()))
}

#[cfg(test)]
pub(crate) fn plain() {
    colored::control::set_override(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_grouped_by_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(650.0), "650");
        assert_eq!(format_number(1234.0), "1,234");
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(-4200.0), "-4,200");
        assert_eq!(format_number(2.345), "2.35");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn share_needs_a_positive_total() {
        assert_eq!(share(1.0, 4.0), Some(0.25));
        assert_eq!(share(1.0, 0.0), None);
        assert_eq!(share(f64::NAN, 4.0), None);
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex("#ef4444"), Some((0xef, 0x44, 0x44)));
        assert_eq!(parse_hex("ef4444"), None);
        assert_eq!(parse_hex("#fff"), None);
    }

    #[test]
    fn bars_scale_to_largest_value() {
        plain();
        let chart = bar_chart(&[
            ChartEntry::new("High", 20.0, "#ef4444"),
            ChartEntry::new("Low", 40.0, "#10b981"),
            ChartEntry::new("None", 0.0, "#6366f1"),
        ]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('█').count(), 0);
        assert!(lines[1].ends_with("40"));
    }

    #[test]
    fn pie_legend_shows_percentages() {
        plain();
        let legend = pie_legend(&[
            ChartEntry::new("Remote", 3.0, "#6366f1"),
            ChartEntry::new("Hybrid", 1.0, "#10b981"),
        ]);
        assert!(legend.contains("Remote: 3 (75.0%)"));
        assert!(legend.contains("Hybrid: 1 (25.0%)"));
    }
}
