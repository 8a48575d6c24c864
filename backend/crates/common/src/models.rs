use serde::{Deserialize, Serialize};

use crate::lenient;

/// Singleton `live_counts` snapshot of streaming estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveCounts {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stress_high: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stress_medium: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stress_low: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub prod_increased: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub prod_decreased: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub prod_stayed_same: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub work_remote: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub work_onsite: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub work_hybrid: u64,
    #[serde(rename = "lastUpdated", default, deserialize_with = "lenient::text")]
    pub last_updated: Option<String>,
}

/// Per-department burnout alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnoutAlert {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub department: String,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub avg_stress: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub employee_count: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommendation: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub alert_timestamp: Option<String>,
}

/// Aggregate impact of one work-location category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLocationImpact {
    #[serde(default, deserialize_with = "lenient::string")]
    pub work_location: String,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub total_employees: f64,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub avg_stress: f64,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub overall_wellbeing: f64,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub remote_effectiveness: f64,
}
