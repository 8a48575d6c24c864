use tabled::settings::Style;
use tabled::{Table, Tabled};
use wellbeing_common::models::LiveCounts;

use super::realtime::RealtimeView;
use super::{bar_chart, format_number, heading, share, ChartEntry, Page};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductivityView {
    pub changes: Vec<ChartEntry>,
    pub last_updated: String,
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Employees")]
    employees: String,
    #[tabled(rename = "Share")]
    share: String,
}

impl ProductivityView {
    pub fn from_counts(counts: &LiveCounts) -> Self {
        let live = RealtimeView::from_counts(counts);
        Self {
            changes: live.productivity_changes,
            last_updated: live.last_updated,
        }
    }

    pub fn total(&self) -> f64 {
        self.changes.iter().map(|e| e.value).sum()
    }

    /// Increased minus decreased.
    pub fn net_change(&self) -> f64 {
        let value = |label: &str| {
            self.changes
                .iter()
                .find(|e| e.label == label)
                .map(|e| e.value)
                .unwrap_or(0.0)
        };
        value("Increased") - value("Decreased")
    }

    pub fn shares(&self) -> Vec<(String, Option<f64>)> {
        let total = self.total();
        self.changes
            .iter()
            .map(|e| (e.label.clone(), share(e.value, total)))
            .collect()
    }

    fn render_table(&self) -> String {
        let rows = self
            .changes
            .iter()
            .zip(self.shares())
            .map(|(entry, (_, s))| ShareRow {
                change: entry.label.clone(),
                employees: format_number(entry.value),
                share: s
                    .map(|s| format!("{:.1}%", s * 100.0))
                    .unwrap_or_else(|| "N/A".to_string()),
            });
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

#[derive(Debug, Default)]
pub struct ProductivityPage {
    view: Option<ProductivityView>,
    last_error: Option<String>,
}

impl ProductivityPage {
    pub fn view(&self) -> Option<&ProductivityView> {
        self.view.as_ref()
    }
}

impl Page for ProductivityPage {
    type Data = LiveCounts;

    fn title(&self) -> &'static str {
        "Productivity Changes"
    }

    fn apply(&mut self, result: Result<LiveCounts, String>) {
        match result {
            Ok(counts) => {
                self.view = Some(ProductivityView::from_counts(&counts));
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e),
        }
    }

    fn render(&self) -> String {
        let mut out = vec![heading(self.title())];
        let Some(view) = &self.view else {
            out.push("Loading productivity data...".to_string());
            if let Some(e) = &self.last_error {
                out.push(format!("Last error: {e}"));
            }
            return out.join("\n");
        };

        let net = view.net_change();
        let sign = if net > 0.0 { "+" } else { "" };
        out.push(format!(
            "Employees Reporting: {}   Net Change: {sign}{}",
            format_number(view.total()),
            format_number(net)
        ));
        out.push(format!("Last Update: {}", view.last_updated));
        if let Some(e) = &self.last_error {
            out.push(format!("Refresh failed, showing previous data: {e}"));
        }
        out.push(String::new());
        out.push(bar_chart(&view.changes));
        out.push(String::new());
        out.push(view.render_table());

        out.join("\n")
    }
}
