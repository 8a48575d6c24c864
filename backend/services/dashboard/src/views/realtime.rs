use wellbeing_common::models::LiveCounts;

use super::{bar_chart, format_number, heading, pie_legend, ChartEntry, Page};

pub const STRESS_SERIES: [(&str, &str); 3] =
    [("High", "#ef4444"), ("Medium", "#f59e0b"), ("Low", "#10b981")];
pub const PRODUCTIVITY_SERIES: [(&str, &str); 3] = [
    ("Increased", "#10b981"),
    ("Decreased", "#ef4444"),
    ("Same", "#6366f1"),
];
pub const LOCATION_SERIES: [(&str, &str); 3] = [
    ("Remote", "#6366f1"),
    ("On-site", "#f43f5e"),
    ("Hybrid", "#8b5cf6"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeView {
    pub stress_levels: Vec<ChartEntry>,
    pub productivity_changes: Vec<ChartEntry>,
    pub locations: Vec<ChartEntry>,
    pub last_updated: String,
}

fn series(spec: &[(&str, &'static str); 3], values: [u64; 3]) -> Vec<ChartEntry> {
    spec.iter()
        .zip(values)
        .map(|((label, color), value)| ChartEntry::new(*label, value as f64, color))
        .collect()
}

impl RealtimeView {
    pub fn from_counts(counts: &LiveCounts) -> Self {
        Self {
            stress_levels: series(
                &STRESS_SERIES,
                [counts.stress_high, counts.stress_medium, counts.stress_low],
            ),
            productivity_changes: series(
                &PRODUCTIVITY_SERIES,
                [
                    counts.prod_increased,
                    counts.prod_decreased,
                    counts.prod_stayed_same,
                ],
            ),
            locations: series(
                &LOCATION_SERIES,
                [counts.work_remote, counts.work_onsite, counts.work_hybrid],
            ),
            last_updated: counts
                .last_updated
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }

    pub fn total_stress_estimate(&self) -> f64 {
        self.stress_levels.iter().map(|e| e.value).sum()
    }

    pub fn onsite_hybrid_presence(&self) -> f64 {
        self.locations.iter().skip(1).map(|e| e.value).sum()
    }

    pub fn productivity_uplift(&self) -> f64 {
        self.productivity_changes
            .first()
            .map(|e| e.value)
            .unwrap_or(0.0)
    }
}

/// Keeps the last good snapshot when a refresh fails.
#[derive(Debug, Default)]
pub struct RealtimePage {
    snapshot: Option<RealtimeView>,
    last_error: Option<String>,
}

impl RealtimePage {
    pub fn snapshot(&self) -> Option<&RealtimeView> {
        self.snapshot.as_ref()
    }
}

impl Page for RealtimePage {
    type Data = LiveCounts;

    fn title(&self) -> &'static str {
        "Real-Time Employee Analytics"
    }

    fn apply(&mut self, result: Result<LiveCounts, String>) {
        match result {
            Ok(counts) => {
                self.snapshot = Some(RealtimeView::from_counts(&counts));
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e),
        }
    }

    fn render(&self) -> String {
        let mut out = vec![heading(self.title())];

        let Some(view) = &self.snapshot else {
            out.push("Waiting for live estimates...".to_string());
            if let Some(e) = &self.last_error {
                out.push(format!("Last error: {e}"));
            }
            return out.join("\n");
        };

        out.push(format!(
            "Total Estimated Count: {}   Onsite/Hybrid Presence: {}   Productivity Uplift (Increased): {}",
            format_number(view.total_stress_estimate()),
            format_number(view.onsite_hybrid_presence()),
            format_number(view.productivity_uplift()),
        ));
        out.push(format!("Last Update: {}", view.last_updated));
        if let Some(e) = &self.last_error {
            out.push(format!("Refresh failed, showing previous snapshot: {e}"));
        }

        out.push(String::new());
        out.push("Stress Level Estimates".to_string());
        out.push(bar_chart(&view.stress_levels));
        out.push(String::new());
        out.push("Productivity Changes".to_string());
        out.push(bar_chart(&view.productivity_changes));
        out.push(String::new());
        out.push("Work Location Distribution".to_string());
        out.push(pie_legend(&view.locations));

        out.join("\n")
    }
}
