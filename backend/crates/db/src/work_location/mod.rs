pub mod mongo_repository;
pub mod repositories;

/// Category key of a location-impact document (`Remote`, `Hybrid`, `Onsite`).
pub const LOCATION_FIELD: &str = "workLocation";

/// Fields the dashboard charts expect as numbers.
pub const NUMERIC_FIELDS: [&str; 4] = [
    "totalEmployees",
    "avgStress",
    "overallWellbeing",
    "remoteEffectiveness",
];
