use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{errors::FetchError, normalize::driver_slug};

/// Placeholder in the headshot template replaced by the driver slug.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// A race as listed in the season schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// Position of the race within the season, used to look up results
    pub round: u32,
    pub name: String,
    pub circuit_name: String,
    /// ISO date, e.g. 2023-03-05
    pub date: String,
    /// ISO time in UTC, e.g. 15:00:00Z. Older seasons do not publish one.
    pub time: Option<String>,
}

/// One classified (or unclassified) finisher of a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub position: u32,
    /// "given family"
    pub driver_name: String,
    pub nationality: String,
    pub team: String,
    /// Race time or gap to the winner, absent when the driver was not timed
    pub time: Option<String>,
    pub points: f32,
    /// Derived from the driver slug; nothing checks that the image exists
    pub headshot_url: String,
}

pub fn headshot_url(template: &str, slug: &str) -> String {
    template.replace(SLUG_PLACEHOLDER, slug)
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T, FetchError> {
    value.trim().parse().map_err(|_| FetchError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// Wire format. Only the fields we read are declared; everything else in the
// payload is ignored.

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(rename = "MRData")]
    pub(crate) mr_data: MrData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MrData {
    #[serde(rename = "RaceTable")]
    pub(crate) race_table: RaceTable,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RaceTable {
    #[serde(rename = "Races")]
    pub(crate) races: Vec<RawRace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRace {
    pub(crate) round: String,
    pub(crate) race_name: String,
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) time: Option<String>,
    #[serde(rename = "Circuit")]
    pub(crate) circuit: RawCircuit,
    #[serde(rename = "Results", default)]
    pub(crate) results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCircuit {
    pub(crate) circuit_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawResult {
    pub(crate) position: String,
    pub(crate) points: String,
    // Ergast capitalizes this key; some mirrors do not
    #[serde(default, alias = "Time")]
    pub(crate) time: Option<RawTime>,
    #[serde(rename = "Driver")]
    pub(crate) driver: RawDriver,
    #[serde(rename = "Constructor")]
    pub(crate) constructor: RawConstructor,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTime {
    pub(crate) time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDriver {
    pub(crate) given_name: String,
    pub(crate) family_name: String,
    pub(crate) nationality: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawConstructor {
    pub(crate) name: String,
}

impl TryFrom<RawRace> for Race {
    type Error = FetchError;

    fn try_from(raw: RawRace) -> Result<Self, Self::Error> {
        Ok(Self {
            round: parse_field("round", &raw.round)?,
            name: raw.race_name,
            circuit_name: raw.circuit.circuit_name,
            date: raw.date,
            time: raw.time,
        })
    }
}

impl RawResult {
    pub(crate) fn into_result(self, headshot_template: &str) -> Result<RaceResult, FetchError> {
        let driver = self.driver;
        let slug = driver_slug(&driver.given_name, &driver.family_name);
        Ok(RaceResult {
            position: parse_field("position", &self.position)?,
            driver_name: format!("{} {}", driver.given_name, driver.family_name),
            nationality: driver.nationality,
            team: self.constructor.name,
            time: self.time.map(|t| t.time),
            points: parse_field("points", &self.points)?,
            headshot_url: headshot_url(headshot_template, &slug),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_result(given: &str, family: &str, position: &str) -> RawResult {
        RawResult {
            position: position.to_string(),
            points: "25".to_string(),
            time: Some(RawTime {
                time: "1:33:56.736".to_string(),
            }),
            driver: RawDriver {
                given_name: given.to_string(),
                family_name: family.to_string(),
                nationality: "Dutch".to_string(),
            },
            constructor: RawConstructor {
                name: "Red Bull".to_string(),
            },
        }
    }

    #[test]
    fn test_headshot_url_interpolation() {
        assert_eq!(
            headshot_url("https://img.example/{slug}/face.jpg", "max-verstappen"),
            "https://img.example/max-verstappen/face.jpg"
        );
        // templates without a placeholder are used verbatim
        assert_eq!(headshot_url("https://img.example/x.jpg", "a-b"), "https://img.example/x.jpg");
    }

    #[test]
    fn test_result_mapping() {
        let result = raw_result("Max", "Verstappen", "1")
            .into_result("https://img.example/{slug}.jpg")
            .unwrap();
        assert_eq!(result.position, 1);
        assert_eq!(result.driver_name, "Max Verstappen");
        assert_eq!(result.nationality, "Dutch");
        assert_eq!(result.team, "Red Bull");
        assert_eq!(result.time.as_deref(), Some("1:33:56.736"));
        assert_eq!(result.points, 25.);
        assert_eq!(result.headshot_url, "https://img.example/max-verstappen.jpg");
    }

    #[test]
    fn test_display_name_keeps_accents() {
        let result = raw_result("Nico", "Hülkenberg", "7")
            .into_result("{slug}")
            .unwrap();
        assert_eq!(result.driver_name, "Nico Hülkenberg");
        assert_eq!(result.headshot_url, "nico-hulkenberg");
    }

    #[test]
    fn test_untimed_driver_has_no_time() {
        let mut raw = raw_result("Logan", "Sargeant", "20");
        raw.time = None;
        let result = raw.into_result("{slug}").unwrap();
        assert!(result.time.is_none());
    }

    #[test]
    fn test_invalid_position_is_rejected() {
        let err = raw_result("Max", "Verstappen", "R")
            .into_result("{slug}")
            .unwrap_err();
        match err {
            FetchError::InvalidField { field, value } => {
                assert_eq!(field, "position");
                assert_eq!(value, "R");
            }
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_fractional_points() {
        let mut raw = raw_result("Lewis", "Hamilton", "3");
        raw.points = "0.5".to_string();
        assert_eq!(raw.into_result("{slug}").unwrap().points, 0.5);
    }
}
