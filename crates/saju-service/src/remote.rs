//! Client for the external scoring service.
//!
//! The service receives year/month/day stem and branch numbers for both
//! people plus a gender flag, and answers with a final score and one
//! 8-slot affliction vector per person. Any failure yields the neutral
//! fallback result.

use std::time::Duration;

use async_trait::async_trait;
use saju_core::constants::AFFLICTION_SLOTS;
use saju_core::{
    BirthInput, Breakdown, CompatibilityResult, FourPillars, Gender, ParsedBirth, ScoreError,
    ScoreSource, parse_pair,
};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::error::UpstreamError;
use crate::strategy::CompatibilityScorer;

pub const SCORE_PATH: &str = "/api/calculate-compatibility";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ScoreRequest {
    person0: [u8; 6],
    person1: [u8; 6],
    gender0: u8,
    gender1: u8,
}

impl ScoreRequest {
    /// Missing gender is sent as 0.
    fn new(
        birth_a: &ParsedBirth,
        pillars_a: &FourPillars,
        birth_b: &ParsedBirth,
        pillars_b: &FourPillars,
    ) -> Self {
        Self {
            person0: pillars_a.remote_encoding(),
            person1: pillars_b.remote_encoding(),
            gender0: birth_a.gender.map_or(0, Gender::flag),
            gender1: birth_b.gender.map_or(0, Gender::flag),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<ScoreData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreData {
    #[serde(default)]
    original_score: Option<f64>,
    final_score: f64,
    sal0: Vec<f64>,
    sal1: Vec<f64>,
    #[serde(default)]
    fallback: bool,
}

/// Validated service answer.
#[derive(Debug, Clone, PartialEq)]
struct RemoteScore {
    final_score: f64,
    breakdown: Breakdown,
    /// The service itself fell back to a default.
    degraded: bool,
}

impl RemoteScore {
    fn into_result(self, pillars_a: FourPillars, pillars_b: FourPillars) -> CompatibilityResult {
        let source = if self.degraded {
            ScoreSource::Fallback
        } else {
            ScoreSource::Remote
        };
        CompatibilityResult::new(self.final_score, pillars_a, pillars_b, self.breakdown, source)
    }
}

fn affliction_vector(name: &str, values: &[f64]) -> Result<[f64; AFFLICTION_SLOTS], UpstreamError> {
    let vector: [f64; AFFLICTION_SLOTS] = values.try_into().map_err(|_| {
        UpstreamError::malformed(format!(
            "{name} has {} entries, expected {AFFLICTION_SLOTS}",
            values.len()
        ))
    })?;
    if let Some(bad) = vector.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(UpstreamError::malformed(format!("{name} contains {bad}")));
    }
    Ok(vector)
}

fn interpret(response: ScoreResponse) -> Result<RemoteScore, UpstreamError> {
    if !response.success {
        return Err(UpstreamError::Rejected {
            message: response.message,
        });
    }
    let data = response
        .data
        .ok_or_else(|| UpstreamError::malformed("success without data"))?;
    if !data.final_score.is_finite() {
        return Err(UpstreamError::malformed(format!(
            "finalScore is {}",
            data.final_score
        )));
    }

    let sal0 = Breakdown::new(affliction_vector("sal0", &data.sal0)?);
    let sal1 = Breakdown::new(affliction_vector("sal1", &data.sal1)?);
    if let Some(original) = data.original_score {
        debug!(original, final_score = data.final_score, "remote score adjusted");
    }

    Ok(RemoteScore {
        final_score: data.final_score,
        breakdown: sal0.combine(&sal1),
        degraded: data.fallback,
    })
}

// =============================================================================
// REMOTE SCORER
// =============================================================================

/// Scores pairs through the external service.
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl RemoteScorer {
    /// Single attempt with default timeout against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        Self::with_config(&RemoteConfig {
            base_url: base_url.into(),
            ..RemoteConfig::default()
        })
    }

    pub fn with_config(config: &RemoteConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| UpstreamError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay(),
        })
    }

    fn score_url(&self) -> String {
        format!("{}{SCORE_PATH}", self.base_url)
    }

    async fn request_once(&self, body: &ScoreRequest) -> Result<RemoteScore, UpstreamError> {
        let response = self.client.post(self.score_url()).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }
        let payload: ScoreResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::malformed(e.to_string()))?;
        interpret(payload)
    }

    async fn request(&self, body: &ScoreRequest) -> Result<RemoteScore, UpstreamError> {
        let mut attempt = 0;
        loop {
            match self.request_once(body).await {
                Ok(score) => return Ok(score),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = backoff_delay(self.retry_base_delay, attempt);
                    debug!(attempt, code = err.code(), ?delay, "retrying remote score");
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl CompatibilityScorer for RemoteScorer {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn score_until(
        &self,
        a: &BirthInput,
        b: &BirthInput,
        cancel: CancellationToken,
    ) -> Result<CompatibilityResult, ScoreError> {
        let ((birth_a, pillars_a), (birth_b, pillars_b)) = parse_pair(a, b)?;
        let body = ScoreRequest::new(&birth_a, &pillars_a, &birth_b, &pillars_b);
        debug!(url = %self.score_url(), ?body, "remote score request");

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UpstreamError::Cancelled),
            outcome = self.request(&body) => outcome,
        };

        Ok(match outcome {
            Ok(remote) => remote.into_result(pillars_a, pillars_b),
            Err(err) => {
                warn!(code = err.code(), error = %err, "remote scoring failed, using fallback");
                CompatibilityResult::fallback(pillars_a, pillars_b)
            }
        })
    }
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let multiplier = 2u32.pow(attempt.min(5));
    base * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> ScoreResponse {
        serde_json::from_value(value).unwrap()
    }

    fn ok_body(sal0: serde_json::Value, sal1: serde_json::Value) -> ScoreResponse {
        response(json!({
            "success": true,
            "data": {
                "originalScore": 70.0,
                "finalScore": 72.46,
                "sal0": sal0,
                "sal1": sal1
            }
        }))
    }

    #[test]
    fn test_request_encoding() {
        let a = BirthInput::new("1990-05-15").with_gender("남");
        let b = BirthInput::new("1992-08-20");
        let ((birth_a, pa), (birth_b, pb)) = parse_pair(&a, &b).unwrap();
        let req = ScoreRequest::new(&birth_a, &pa, &birth_b, &pb);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "person0": [7, 7, 8, 7, 7, 7],
                "person1": [9, 9, 5, 10, 5, 7],
                "gender0": 1,
                "gender1": 0
            })
        );
    }

    #[test]
    fn test_interpret_sums_vectors() {
        let score = interpret(ok_body(
            json!([1, 0, 2, 0, 0, 0, 0, 0.5]),
            json!([0, 3, 1, 0, 0, 0, 1, 0]),
        ))
        .unwrap();
        assert_eq!(
            score.breakdown.values(),
            &[1.0, 3.0, 3.0, 0.0, 0.0, 0.0, 1.0, 0.5]
        );
        assert!(!score.degraded);

        let p = saju_core::convert(1990, 5, 15, 12).unwrap();
        let result = score.into_result(p, p);
        assert_eq!(result.score, 72.5);
        assert_eq!(result.source, ScoreSource::Remote);
    }

    #[test]
    fn test_interpret_rejects_wrong_length() {
        let err = interpret(ok_body(json!([0, 0, 0, 0]), json!([0, 0, 0, 0, 0, 0, 0, 0]))).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(m) if m.contains("sal0 has 4")));
    }

    #[test]
    fn test_interpret_rejects_negative_counts() {
        let err = interpret(ok_body(json!([0, 0, 0, 0, 0, 0, 0, 0]), json!([0, 0, -1, 0, 0, 0, 0, 0]))).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(m) if m.contains("sal1")));
    }

    #[test]
    fn test_interpret_unsuccessful() {
        let err = interpret(response(json!({"success": false, "message": "busy"}))).unwrap_err();
        assert!(matches!(err, UpstreamError::Rejected { message: Some(m) } if m == "busy"));

        let err = interpret(response(json!({"success": true}))).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
    }

    #[test]
    fn test_service_side_fallback_flag() {
        let score = interpret(response(json!({
            "success": true,
            "data": {"finalScore": 100, "sal0": [0, 0, 0, 0, 0, 0, 0, 0], "sal1": [0, 0, 0, 0, 0, 0, 0, 0], "fallback": true}
        })))
        .unwrap();
        assert!(score.degraded);
        let p = saju_core::convert(2000, 1, 1, 12).unwrap();
        assert!(score.into_result(p, p).is_fallback());
    }

    #[test]
    fn test_score_clamped_from_service() {
        let score = interpret(response(json!({
            "success": true,
            "data": {"finalScore": 140.0, "sal0": [0, 0, 0, 0, 0, 0, 0, 0], "sal1": [0, 0, 0, 0, 0, 0, 0, 0]}
        })))
        .unwrap();
        let p = saju_core::convert(2000, 1, 1, 12).unwrap();
        assert_eq!(score.into_result(p, p).score, 100.0);
    }

    #[test]
    fn test_backoff_delay() {
        let base = Duration::from_millis(100);
        assert_eq!(backoff_delay(base, 0), Duration::from_millis(100));
        assert_eq!(backoff_delay(base, 1), Duration::from_millis(200));
        assert_eq!(backoff_delay(base, 3), Duration::from_millis(800));
        assert_eq!(backoff_delay(base, 9), Duration::from_millis(3200));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let scorer = RemoteScorer::new("http://localhost:8000/").unwrap();
        assert_eq!(
            scorer.score_url(),
            "http://localhost:8000/api/calculate-compatibility"
        );
    }
}
