use std::collections::BTreeMap;

pub const FIELD_KEYWORDS: &str = "keywords";
pub const FIELD_MAX_RESULTS: &str = "max_results";
pub const FIELD_SLEEP_TIME: &str = "sleep_time";

pub const MAX_RESULTS_MIN: u32 = 1;
pub const MAX_RESULTS_MAX: u32 = 50;
pub const SLEEP_TIME_MIN: f64 = 0.5;
pub const SLEEP_TIME_MAX: f64 = 10.0;

/// A validated scrape-form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub keywords: String,
    pub max_results: u32,
    pub sleep_time: f64,
}

impl ScrapeRequest {
    /// Builds a request from raw form fields, collecting every violation.
    ///
    /// Unparseable numeric fields count as out-of-range rather than passing
    /// validation by accident.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, Vec<String>> {
        let mut violations = Vec::new();

        let keywords = fields
            .get(FIELD_KEYWORDS)
            .map(|value| value.trim())
            .unwrap_or("");
        if keywords.is_empty() {
            violations.push("Keywords are required".to_string());
        }

        let max_results = fields
            .get(FIELD_MAX_RESULTS)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|count| (MAX_RESULTS_MIN..=MAX_RESULTS_MAX).contains(count));
        if max_results.is_none() {
            violations.push(format!(
                "Max results must be between {MAX_RESULTS_MIN} and {MAX_RESULTS_MAX}"
            ));
        }

        let sleep_time = fields
            .get(FIELD_SLEEP_TIME)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| (SLEEP_TIME_MIN..=SLEEP_TIME_MAX).contains(seconds));
        if sleep_time.is_none() {
            violations.push(format!(
                "Sleep time must be between {SLEEP_TIME_MIN} and {SLEEP_TIME_MAX} seconds"
            ));
        }

        match (max_results, sleep_time) {
            (Some(max_results), Some(sleep_time)) if violations.is_empty() => Ok(Self {
                keywords: keywords.to_string(),
                max_results,
                sleep_time,
            }),
            _ => Err(violations),
        }
    }
}
