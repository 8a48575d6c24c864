use wellbeing_common::models::{BurnoutAlert, LiveCounts};

use super::alerts::{Severity, CRITICAL_STRESS};
use super::realtime::RealtimeView;
use super::{format_number, heading, pie_legend, ChartEntry, Page};

/// Headline numbers combining live counts with the alert list.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub locations: Vec<ChartEntry>,
    pub total_stress_estimate: f64,
    pub high_stress: f64,
    pub departments_flagged: usize,
    pub critical_departments: usize,
    pub employees_at_risk: u64,
    pub last_updated: String,
}

impl OverviewView {
    pub fn new(counts: &LiveCounts, alerts: &[BurnoutAlert]) -> Self {
        let live = RealtimeView::from_counts(counts);
        Self {
            total_stress_estimate: live.total_stress_estimate(),
            high_stress: counts.stress_high as f64,
            departments_flagged: alerts.len(),
            critical_departments: alerts
                .iter()
                .filter(|a| Severity::for_stress(a.avg_stress) == Severity::Critical)
                .count(),
            employees_at_risk: alerts
                .iter()
                .fold(0u64, |acc, a| acc.saturating_add(a.employee_count)),
            locations: live.locations,
            last_updated: live.last_updated,
        }
    }

    /// Fraction of the stress estimate in the high bucket.
    pub fn high_stress_share(&self) -> Option<f64> {
        super::share(self.high_stress, self.total_stress_estimate)
    }
}

#[derive(Debug, Default)]
pub struct OverviewPage {
    view: Option<OverviewView>,
    last_error: Option<String>,
}

impl OverviewPage {
    pub fn view(&self) -> Option<&OverviewView> {
        self.view.as_ref()
    }
}

impl Page for OverviewPage {
    type Data = (LiveCounts, Vec<BurnoutAlert>);

    fn title(&self) -> &'static str {
        "Employee Wellbeing Overview"
    }

    fn apply(&mut self, result: Result<(LiveCounts, Vec<BurnoutAlert>), String>) {
        match result {
            Ok((counts, alerts)) => {
                self.view = Some(OverviewView::new(&counts, &alerts));
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e),
        }
    }

    fn render(&self) -> String {
        let mut out = vec![heading(self.title())];
        let Some(view) = &self.view else {
            out.push("Loading overview...".to_string());
            if let Some(e) = &self.last_error {
                out.push(format!("Last error: {e}"));
            }
            return out.join("\n");
        };

        let high_share = view
            .high_stress_share()
            .map(|s| format!("{:.1}%", s * 100.0))
            .unwrap_or_else(|| "N/A".to_string());

        out.push(format!(
            "Employees Tracked: {}   High Stress: {high_share}",
            format_number(view.total_stress_estimate)
        ));
        out.push(format!(
            "Departments Flagged: {} ({} above {CRITICAL_STRESS})   Employees at Risk: {}",
            view.departments_flagged,
            view.critical_departments,
            format_number(view.employees_at_risk as f64)
        ));
        out.push(format!("Last Update: {}", view.last_updated));
        if let Some(e) = &self.last_error {
            out.push(format!("Refresh failed, showing previous data: {e}"));
        }
        out.push(String::new());
        out.push("Work Location Distribution".to_string());
        out.push(pie_legend(&view.locations));

        out.join("\n")
    }
}
