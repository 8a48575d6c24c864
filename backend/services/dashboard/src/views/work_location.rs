use tabled::settings::Style;
use tabled::{Table, Tabled};
use wellbeing_common::models::WorkLocationImpact;

use super::{bar_chart, fixed2, format_number, heading, pie_legend, ChartEntry, Page};

pub const PIE_COLORS: [&str; 3] = ["#6366f1", "#10b981", "#f59e0b"];
pub const STRESS_COLOR: &str = "#ef4444";
pub const WELLBEING_COLOR: &str = "#10b981";
pub const EFFECTIVENESS_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    AvgStress,
    OverallWellbeing,
    RemoteEffectiveness,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::AvgStress,
        Metric::OverallWellbeing,
        Metric::RemoteEffectiveness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::AvgStress => "Avg Stress",
            Metric::OverallWellbeing => "Overall Wellbeing",
            Metric::RemoteEffectiveness => "Remote Effectiveness",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Metric::AvgStress => STRESS_COLOR,
            Metric::OverallWellbeing => WELLBEING_COLOR,
            Metric::RemoteEffectiveness => EFFECTIVENESS_COLOR,
        }
    }

    fn value(self, row: &WorkLocationImpact) -> f64 {
        match self {
            Metric::AvgStress => row.avg_stress,
            Metric::OverallWellbeing => row.overall_wellbeing,
            Metric::RemoteEffectiveness => row.remote_effectiveness,
        }
    }
}

#[derive(Tabled)]
struct ImpactRow {
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Employees")]
    employees: String,
    #[tabled(rename = "Avg Stress")]
    avg_stress: String,
    #[tabled(rename = "Wellbeing")]
    wellbeing: String,
    #[tabled(rename = "Effectiveness")]
    effectiveness: String,
}

/// Totals and per-metric averages across location rows.
#[derive(Debug, Clone, Default)]
pub struct ImpactSummary {
    pub rows: Vec<WorkLocationImpact>,
}

impl ImpactSummary {
    pub fn new(rows: Vec<WorkLocationImpact>) -> Self {
        Self { rows }
    }

    pub fn total_employees(&self) -> f64 {
        self.rows.iter().map(|r| r.total_employees).sum()
    }

    /// Mean of `metric` over all rows; `None` with no rows.
    pub fn average(&self, metric: Metric) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let sum: f64 = self.rows.iter().map(|r| metric.value(r)).sum();
        Some(sum / self.rows.len() as f64)
    }

    /// Employees per location, colours cycling through the pie palette.
    pub fn distribution(&self) -> Vec<ChartEntry> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                ChartEntry::new(
                    r.work_location.clone(),
                    r.total_employees,
                    PIE_COLORS[i % PIE_COLORS.len()],
                )
            })
            .collect()
    }

    pub fn metric_bars(&self, metric: Metric) -> Vec<ChartEntry> {
        self.rows
            .iter()
            .map(|r| ChartEntry::new(r.work_location.clone(), metric.value(r), metric.color()))
            .collect()
    }

    pub(crate) fn render_kpis(&self) -> String {
        let avg = |m: Metric| self.average(m).map(fixed2).unwrap_or_else(|| "N/A".into());
        format!(
            "Total Employees: {}   Avg Stress: {}   Avg Wellbeing: {}   Avg Effectiveness: {}",
            format_number(self.total_employees()),
            avg(Metric::AvgStress),
            avg(Metric::OverallWellbeing),
            avg(Metric::RemoteEffectiveness),
        )
    }

    fn render_table(&self) -> String {
        let rows = self.rows.iter().map(|r| ImpactRow {
            location: r.work_location.clone(),
            employees: format_number(r.total_employees),
            avg_stress: fixed2(r.avg_stress),
            wellbeing: fixed2(r.overall_wellbeing),
            effectiveness: fixed2(r.remote_effectiveness),
        });
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

/// Fetched once; a failed fetch shows the empty state.
#[derive(Debug, Default)]
pub struct WorkLocationPage {
    summary: ImpactSummary,
    last_error: Option<String>,
}

impl WorkLocationPage {
    pub fn summary(&self) -> &ImpactSummary {
        &self.summary
    }
}

impl Page for WorkLocationPage {
    type Data = Vec<WorkLocationImpact>;

    fn title(&self) -> &'static str {
        "Work Location Impact"
    }

    fn apply(&mut self, result: Result<Vec<WorkLocationImpact>, String>) {
        match result {
            Ok(rows) => {
                self.summary = ImpactSummary::new(rows);
                self.last_error = None;
            }
            Err(e) => {
                self.summary = ImpactSummary::default();
                self.last_error = Some(e);
            }
        }
    }

    fn render(&self) -> String {
        let mut out = vec![heading(self.title())];
        if let Some(e) = &self.last_error {
            out.push(format!("Fetch failed: {e}"));
        }
        if self.summary.rows.is_empty() {
            out.push("No work-location data available".to_string());
            return out.join("\n");
        }

        out.push(self.summary.render_kpis());
        out.push(String::new());
        out.push("Employees Distribution".to_string());
        out.push(pie_legend(&self.summary.distribution()));
        out.push(String::new());
        out.push(self.summary.render_table());

        for metric in Metric::ALL {
            out.push(String::new());
            out.push(format!("{} by Location", metric.label()));
            out.push(bar_chart(&self.summary.metric_bars(metric)));
        }

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::plain;

    fn row(location: &str, employees: f64, stress: f64, wellbeing: f64, eff: f64) -> WorkLocationImpact {
        WorkLocationImpact {
            work_location: location.to_string(),
            total_employees: employees,
            avg_stress: stress,
            overall_wellbeing: wellbeing,
            remote_effectiveness: eff,
        }
    }

    fn rows() -> Vec<WorkLocationImpact> {
        vec![
            row("Hybrid", 80.0, 2.1, 4.1, 3.5),
            row("Onsite", 95.0, 2.6, 3.2, 2.0),
            row("Remote", 120.0, 2.3, 3.8, 4.0),
            row("Satellite", 5.0, 2.0, 4.0, 3.0),
        ]
    }

    #[test]
    fn totals_and_averages() {
        let summary = ImpactSummary::new(rows());
        assert_eq!(summary.total_employees(), 300.0);
        let stress = summary.average(Metric::AvgStress).unwrap();
        assert!((stress - 2.25).abs() < 1e-9);
        let eff = summary.average(Metric::RemoteEffectiveness).unwrap();
        assert!((eff - 3.125).abs() < 1e-9);
    }

    #[test]
    fn averages_of_nothing_are_none() {
        let summary = ImpactSummary::default();
        assert_eq!(summary.total_employees(), 0.0);
        assert_eq!(summary.average(Metric::AvgStress), None);
    }

    #[test]
    fn pie_colors_cycle() {
        let colors: Vec<&str> = ImpactSummary::new(rows())
            .distribution()
            .iter()
            .map(|e| e.color)
            .collect();
        assert_eq!(colors, vec!["#6366f1", "#10b981", "#f59e0b", "#6366f1"]);
    }

    #[test]
    fn metric_bars_use_metric_colors() {
        let bars = ImpactSummary::new(rows()).metric_bars(Metric::AvgStress);
        assert!(bars.iter().all(|b| b.color == "#ef4444"));
        assert_eq!(bars[2], ChartEntry::new("Remote", 2.3, "#ef4444"));
    }

    #[test]
    fn render_includes_kpis_and_table() {
        plain();
        let mut page = WorkLocationPage::default();
        page.apply(Ok(rows()));
        let text = page.render();
        assert!(text.contains("Total Employees: 300"));
        assert!(text.contains("Avg Stress: 2.25"));
        assert!(text.contains("Remote"));
        assert!(text.contains("Remote Effectiveness by Location"));
    }

    #[test]
    fn failed_fetch_shows_empty_state() {
        let mut page = WorkLocationPage::default();
        page.apply(Ok(rows()));
        page.apply(Err("HTTP 500".into()));
        assert!(page.summary().rows.is_empty());
        assert!(page.render().contains("No work-location data available"));
    }
}
