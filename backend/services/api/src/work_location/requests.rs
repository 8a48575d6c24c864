use serde::Deserialize;
use wellbeing_common::error::{WellbeingError, WellbeingResult};

pub const DEFAULT_LOCATION: &str = "Remote";

#[derive(Debug, Default, Deserialize)]
pub struct AccessImpactQuery {
    pub location: Option<String>,
}

impl AccessImpactQuery {
    /// The category to look up; defaults to `Remote`, rejects blank values.
    pub fn location(&self) -> WellbeingResult<&str> {
        match self.location.as_deref() {
            None => Ok(DEFAULT_LOCATION),
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Err(WellbeingError::Validation(
                        "location must not be empty".to_string(),
                    ))
                } else {
                    Ok(trimmed)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_location_defaults_to_remote() {
        let query = AccessImpactQuery::default();
        assert_eq!(query.location().expect("default"), "Remote");
    }

    #[test]
    fn location_is_trimmed() {
        let query = AccessImpactQuery {
            location: Some("  Hybrid ".into()),
        };
        assert_eq!(query.location().expect("trimmed"), "Hybrid");
    }

    #[test]
    fn blank_location_is_rejected() {
        let query = AccessImpactQuery {
            location: Some("   ".into()),
        };
        assert!(matches!(
            query.location(),
            Err(WellbeingError::Validation(_))
        ));
    }
}
