use colored::Colorize;
use wellbeing_common::models::WorkLocationImpact;

use super::work_location::{EFFECTIVENESS_COLOR, STRESS_COLOR, WELLBEING_COLOR};
use super::{fixed2, format_number, heading, paint, Page};

/// Comparison card for one work-location category (Remote by default).
#[derive(Debug)]
pub struct AccessImpactPage {
    location: String,
    row: Option<WorkLocationImpact>,
    last_error: Option<String>,
}

impl AccessImpactPage {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            row: None,
            last_error: None,
        }
    }

    pub fn row(&self) -> Option<&WorkLocationImpact> {
        self.row.as_ref()
    }
}

impl Page for AccessImpactPage {
    type Data = WorkLocationImpact;

    fn title(&self) -> &'static str {
        "Access Impact Overview"
    }

    fn apply(&mut self, result: Result<WorkLocationImpact, String>) {
        match result {
            Ok(row) => {
                self.row = Some(row);
                self.last_error = None;
            }
            Err(e) => {
                self.row = None;
                self.last_error = Some(e);
            }
        }
    }

    fn render(&self) -> String {
        let mut out = vec![heading(self.title())];

        let Some(row) = &self.row else {
            out.push(format!("No impact data for {}", self.location));
            if let Some(e) = &self.last_error {
                out.push(format!("Fetch failed: {e}"));
            }
            return out.join("\n");
        };

        let location = if row.work_location.is_empty() {
            self.location.as_str()
        } else {
            row.work_location.as_str()
        };
        out.push(format!("Location: {}", location.bold()));
        out.push(format!(
            "  Employees:            {}",
            format_number(row.total_employees)
        ));
        out.push(format!(
            "  Avg Stress:           {}",
            paint(&fixed2(row.avg_stress), STRESS_COLOR)
        ));
        out.push(format!(
            "  Overall Wellbeing:    {}",
            paint(&fixed2(row.overall_wellbeing), WELLBEING_COLOR)
        ));
        out.push(format!(
            "  Remote Effectiveness: {}",
            paint(&fixed2(row.remote_effectiveness), EFFECTIVENESS_COLOR)
        ));

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::plain;

    fn remote() -> WorkLocationImpact {
        WorkLocationImpact {
            work_location: "Remote".to_string(),
            total_employees: 120.0,
            avg_stress: 2.3,
            overall_wellbeing: 3.8,
            remote_effectiveness: 4.0,
        }
    }

    #[test]
    fn renders_comparison_card() {
        plain();
        let mut page = AccessImpactPage::new("Remote");
        page.apply(Ok(remote()));
        let text = page.render();
        assert!(text.contains("Location: Remote"));
        assert!(text.contains("120"));
        assert!(text.contains("2.30"));
        assert!(text.contains("4.00"));
    }

    #[test]
    fn missing_row_shows_empty_state() {
        let mut page = AccessImpactPage::new("Hybrid");
        page.apply(Ok(remote()));
        page.apply(Err("HTTP 404 Not Found".into()));
        assert!(page.row().is_none());
        let text = page.render();
        assert!(text.contains("No impact data for Hybrid"));
        assert!(text.contains("HTTP 404"));
    }
}
