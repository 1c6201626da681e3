use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Tunable parameters for passage detection, routing and auto-connect.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Widest endpoint gap still treated as a passage.
    pub max_gap_size: f64,
    /// Gaps at or below this are touching walls, not passages.
    pub min_gap_size: f64,
    /// Maximum direction difference, in degrees, for two walls to count as
    /// aligned.
    pub alignment_tolerance_deg: f64,
    /// Gaps up to this width are doors; wider ones are openings.
    pub door_threshold: f64,
    /// Weight of the detour length in single-passage scoring.
    pub detour_penalty: f64,
    /// Clearance kept from walls on top of their half-thickness.
    pub wall_margin: f64,
    /// Default search radius for nearest-neighbor auto-connect.
    pub auto_connect_distance: f64,
    /// Default proximity threshold for sequential auto-connect.
    pub sequential_threshold: f64,
    /// Height of the row buckets used to order nodes for sequential
    /// auto-connect.
    pub row_bucket_height: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_gap_size: 100.0,
            min_gap_size: 1.0,
            alignment_tolerance_deg: 30.0,
            door_threshold: 60.0,
            detour_penalty: 0.5,
            wall_margin: 0.0,
            auto_connect_distance: 500.0,
            sequential_threshold: 150.0,
            row_bucket_height: 100.0,
        }
    }
}

impl RoutingConfig {
    /// Parses a JSON configuration and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or
    /// `ConfigError::InvalidParameter` if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    /// Checks that every parameter is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("max_gap_size", self.max_gap_size),
            ("min_gap_size", self.min_gap_size),
            ("door_threshold", self.door_threshold),
            ("detour_penalty", self.detour_penalty),
            ("wall_margin", self.wall_margin),
            ("auto_connect_distance", self.auto_connect_distance),
            ("sequential_threshold", self.sequential_threshold),
        ];
        for (parameter, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(parameter, value, "must be finite and non-negative"));
            }
        }

        if !self.row_bucket_height.is_finite() || self.row_bucket_height <= 0.0 {
            return Err(invalid(
                "row_bucket_height",
                self.row_bucket_height,
                "must be finite and positive",
            ));
        }
        if self.min_gap_size >= self.max_gap_size {
            return Err(invalid(
                "min_gap_size",
                self.min_gap_size,
                "must be smaller than max_gap_size",
            ));
        }
        if !(0.0..=90.0).contains(&self.alignment_tolerance_deg) {
            return Err(invalid(
                "alignment_tolerance_deg",
                self.alignment_tolerance_deg,
                "must be within [0, 90] degrees",
            ));
        }
        Ok(())
    }
}

fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> crate::RouteError {
    ConfigError::InvalidParameter {
        parameter,
        value,
        reason,
    }
    .into()
}
