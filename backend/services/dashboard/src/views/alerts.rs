use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use colored::Colorize;
use wellbeing_common::models::BurnoutAlert;

use super::{fixed2, format_number, heading, Page};

/// Average stress above this is critical; at or below it is elevated.
pub const CRITICAL_STRESS: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Elevated,
}

impl Severity {
    pub fn for_stress(avg_stress: f64) -> Self {
        if avg_stress > CRITICAL_STRESS {
            Self::Critical
        } else {
            Self::Elevated
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertCard {
    pub department: String,
    pub avg_stress: f64,
    pub employees_affected: u64,
    pub last_update: String,
    pub recommendation: String,
    pub severity: Severity,
}

impl AlertCard {
    pub fn from_alert<Tz>(alert: &BurnoutAlert, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            department: alert.department.clone(),
            avg_stress: alert.avg_stress,
            employees_affected: alert.employee_count,
            last_update: format_clock(alert.last_updated.as_deref(), tz),
            recommendation: alert.recommendation.clone(),
            severity: Severity::for_stress(alert.avg_stress),
        }
    }

    pub fn stress_label(&self) -> String {
        format!("{} / 3.0", fixed2(self.avg_stress))
    }
}

/// `HH:MM` in `tz`, or `--:--` when the timestamp is missing or unreadable.
/// Timestamps without an offset are taken as already being in `tz`.
pub fn format_clock<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "--:--".to_string();
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(tz).format("%H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format("%H:%M").to_string();
        }
    }
    "--:--".to_string()
}

/// A failed fetch empties the list. Nothing is listed until the first
/// fetch settles.
#[derive(Debug, Default)]
pub struct AlertsPage {
    cards: Vec<AlertCard>,
    loaded: bool,
    last_error: Option<String>,
}

impl AlertsPage {
    pub fn cards(&self) -> &[AlertCard] {
        &self.cards
    }

    pub fn badge(&self) -> String {
        format!("{} detected", self.cards.len())
    }

    fn render_card(card: &AlertCard) -> String {
        let tag = match card.severity {
            Severity::Critical => "CRITICAL".red().bold(),
            Severity::Elevated => "ELEVATED".yellow().bold(),
        };
        let stress = match card.severity {
            Severity::Critical => fixed2(card.avg_stress).red().bold(),
            Severity::Elevated => fixed2(card.avg_stress).yellow().bold(),
        };
        [
            format!("[{tag}] {}", card.department.bold()),
            format!("  Last update: {}", card.last_update),
            format!("  Sustained stress average: {stress} / 3.0"),
            format!(
                "  {} employees affected",
                format_number(card.employees_affected as f64)
            ),
            format!("  Immediate intervention: {}", card.recommendation),
        ]
        .join("\n")
    }
}

impl Page for AlertsPage {
    type Data = Vec<BurnoutAlert>;

    fn title(&self) -> &'static str {
        "Department Burnout Alerts"
    }

    fn apply(&mut self, result: Result<Vec<BurnoutAlert>, String>) {
        self.loaded = true;
        match result {
            Ok(alerts) => {
                self.cards = alerts
                    .iter()
                    .map(|a| AlertCard::from_alert(a, &Local))
                    .collect();
                self.last_error = None;
            }
            Err(e) => {
                self.cards.clear();
                self.last_error = Some(e);
            }
        }
    }

    fn render(&self) -> String {
        if !self.loaded {
            return format!("{}\nLoading streaming insights...", heading(self.title()));
        }

        let mut out = vec![
            heading(self.title()),
            format!("Active Risk Alerts  [{}]", self.badge().on_red().white()),
        ];
        if let Some(e) = &self.last_error {
            out.push(format!("Fetch alerts failed: {e}").dimmed().to_string());
        }
        out.push(String::new());

        if self.cards.is_empty() {
            out.push("No burnout risks detected".green().bold().to_string());
            out.push(
                "All departments are currently operating within safe stress parameters."
                    .to_string(),
            );
        } else {
            let cards: Vec<String> = self.cards.iter().map(Self::render_card).collect();
            out.push(cards.join("\n\n"));
        }

        out.join("\n")
    }
}
