//! Static placeholder credits.
//!
//! The catalog response carries no crew or award data, so these fields are
//! fixed configuration rather than fetched values. Defaults reproduce the
//! placeholder content the page has always shown.

use serde::{Deserialize, Serialize};

/// Credits and badges shown on every movie page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCredits {
    /// Certification label (e.g. "PG-13").
    pub certification: String,
    /// Director names.
    pub directors: Vec<String>,
    /// Writer names.
    pub writers: Vec<String>,
    /// Star names.
    pub stars: Vec<String>,
    /// "Top rated movie #N" rank.
    pub top_rated_rank: u32,
    /// Awards summary line.
    pub awards: String,
}

impl Default for StaticCredits {
    fn default() -> Self {
        Self {
            certification: String::from("PG-13"),
            directors: vec![String::from("Joseph Kosinski")],
            writers: vec![
                String::from("Jim Cash"),
                String::from("Jack Epps Jr"),
                String::from("Peter Craig"),
            ],
            stars: vec![
                String::from("Tom Cruise"),
                String::from("Jennifer Connelly"),
                String::from("Miles Teller"),
            ],
            top_rated_rank: 65,
            awards: String::from("Awards 9 nominations"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
            certification = "R"
            directors = ["David Fincher"]
        "#;

        // Act
        let credits: StaticCredits = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(credits.certification, "R");
        assert_eq!(credits.directors, vec![String::from("David Fincher")]);
        assert_eq!(credits.stars, StaticCredits::default().stars);
        assert_eq!(credits.top_rated_rank, 65);
    }
}
