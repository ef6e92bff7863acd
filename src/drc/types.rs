//! Min-area DRC data types
//!
//! Violation records, the sink they are reported to, and checker parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid, DrcError, Result};
use crate::geometry::Region;

/// Parameter keys recognized by the checker
pub const NUM_THREADS: &str = "NumThreads";
pub const RECTS_PER_STRIPE: &str = "RectsPerStripe";
pub const REPORT_TILES: &str = "ReportTiles";

/// A connected region whose area is below the minimum
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub area: i64,
    /// Lexicographically maximal vertex of the region
    pub x: i32,
    pub y: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Region>,
}

/// Receiver of min-area violations.
///
/// When `shape` is present its maximal vertex is exactly `(x, y)`.
pub trait ViolationSink {
    fn report_violation(&mut self, area: i64, x: i32, y: i32, shape: Option<Region>);
}

impl ViolationSink for Vec<Violation> {
    fn report_violation(&mut self, area: i64, x: i32, y: i32, shape: Option<Region>) {
        self.push(Violation { area, x, y, shape });
    }
}

/// A single parameter value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
        }
    }
}

impl FromStr for ParamValue {
    type Err = DrcError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
            return Ok(ParamValue::Bool(true));
        }
        if s.eq_ignore_ascii_case("false") {
            return Ok(ParamValue::Bool(false));
        }
        s.parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| invalid(format!("parameter value '{}' is neither a boolean nor an integer", s)))
    }
}

/// Ordered key → value map of checker options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a `KEY=VALUE` assignment
    pub fn parse_assignment(text: &str) -> Result<(String, ParamValue)> {
        let (key, value) = text
            .split_once('=')
            .ok_or_else(|| invalid(format!("expected KEY=VALUE, got '{}'", text)))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid(format!("empty parameter name in '{}'", text)));
        }
        Ok((key.to_string(), value.parse()?))
    }
}

/// Typed view of the recognized parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Worker count for a striped run; the bitmap checker runs on one thread regardless
    pub num_threads: usize,
    /// Stripe size for a striped run; unused by the bitmap checker
    pub rects_per_stripe: usize,
    /// Attach the region outline to every violation
    pub report_tiles: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            num_threads: 1,
            rects_per_stripe: 500,
            report_tiles: true,
        }
    }
}

impl CheckerConfig {
    pub fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params
            .set(NUM_THREADS, self.num_threads as i64)
            .set(RECTS_PER_STRIPE, self.rects_per_stripe as i64)
            .set(REPORT_TILES, self.report_tiles);
        params
    }

    /// Defaults overlaid with `params`. Unknown keys are ignored with a warning.
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in params.iter() {
            match key {
                NUM_THREADS => config.num_threads = positive_int(key, value)?,
                RECTS_PER_STRIPE => config.rects_per_stripe = positive_int(key, value)?,
                REPORT_TILES => match value {
                    ParamValue::Bool(b) => config.report_tiles = b,
                    ParamValue::Int(_) => {
                        return Err(invalid(format!("{} expects a boolean, got {}", key, value)))
                    }
                },
                _ => tracing::warn!(key, "[MinArea] Ignoring unknown parameter"),
            }
        }
        Ok(config)
    }
}

fn positive_int(key: &str, value: ParamValue) -> Result<usize> {
    match value {
        ParamValue::Int(i) if i > 0 => usize::try_from(i)
            .map_err(|_| invalid(format!("{} value {} is too large", key, i))),
        _ => Err(invalid(format!("{} expects a positive integer, got {}", key, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_parameters() {
        let params = CheckerConfig::default().to_parameters();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![NUM_THREADS, RECTS_PER_STRIPE, REPORT_TILES]);
        assert_eq!(CheckerConfig::from_parameters(&params).unwrap(), CheckerConfig::default());
    }

    #[test]
    fn test_report_tiles_override() {
        let mut params = Parameters::new();
        params.set(REPORT_TILES, false);
        let config = CheckerConfig::from_parameters(&params).unwrap();
        assert!(!config.report_tiles);
        assert_eq!(config.num_threads, 1);
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let mut params = Parameters::new();
        params.set(REPORT_TILES, 3i64);
        assert!(CheckerConfig::from_parameters(&params).is_err());

        let mut params = Parameters::new();
        params.set(NUM_THREADS, true);
        assert!(CheckerConfig::from_parameters(&params).is_err());

        let mut params = Parameters::new();
        params.set(RECTS_PER_STRIPE, 0i64);
        assert!(CheckerConfig::from_parameters(&params).is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut params = Parameters::new();
        params.set("Flavor", 7i64);
        assert_eq!(CheckerConfig::from_parameters(&params).unwrap(), CheckerConfig::default());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            Parameters::parse_assignment("ReportTiles=false").unwrap(),
            (REPORT_TILES.to_string(), ParamValue::Bool(false))
        );
        assert_eq!(
            Parameters::parse_assignment("NumThreads = 4").unwrap(),
            (NUM_THREADS.to_string(), ParamValue::Int(4))
        );
        assert!(Parameters::parse_assignment("NumThreads").is_err());
        assert!(Parameters::parse_assignment("=4").is_err());
        assert!(Parameters::parse_assignment("NumThreads=many").is_err());
    }

    #[test]
    fn test_parameters_serialize_as_plain_map() {
        let json = serde_json::to_string(&CheckerConfig::default().to_parameters()).unwrap();
        assert_eq!(json, r#"{"NumThreads":1,"RectsPerStripe":500,"ReportTiles":true}"#);
        let back: Parameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(REPORT_TILES), Some(ParamValue::Bool(true)));
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Violation> = Vec::new();
        sink.report_violation(3, 2, 1, None);
        sink.report_violation(1, 0, 0, None);
        assert_eq!(sink.len(), 2);
        assert_eq!((sink[0].area, sink[0].x, sink[0].y), (3, 2, 1));
    }
}
