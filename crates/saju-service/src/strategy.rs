use std::sync::Arc;

use async_trait::async_trait;
use saju_core::{BirthInput, CompatibilityResult, ScoreError, score_local};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{ServiceConfig, Strategy};
use crate::error::UpstreamError;
use crate::remote::RemoteScorer;

/// One way of scoring a pair of people.
///
/// Validation errors are the only failure a caller ever sees; upstream
/// trouble in a remote strategy degrades to a fallback result instead.
#[async_trait]
pub trait CompatibilityScorer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn score(
        &self,
        a: &BirthInput,
        b: &BirthInput,
    ) -> Result<CompatibilityResult, ScoreError> {
        self.score_until(a, b, CancellationToken::new()).await
    }

    /// Like `score`, giving up on outstanding I/O once `cancel` fires.
    async fn score_until(
        &self,
        a: &BirthInput,
        b: &BirthInput,
        cancel: CancellationToken,
    ) -> Result<CompatibilityResult, ScoreError>;
}

/// In-process scoring. Pure and sub-millisecond, so cancellation is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScorer;

#[async_trait]
impl CompatibilityScorer for LocalScorer {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn score_until(
        &self,
        a: &BirthInput,
        b: &BirthInput,
        _cancel: CancellationToken,
    ) -> Result<CompatibilityResult, ScoreError> {
        let result = score_local(a, b)?;
        debug!(score = result.score, tier = ?result.tier, "local score");
        Ok(result)
    }
}

/// Construct the scorer selected by `config.strategy`.
pub fn build_scorer(config: &ServiceConfig) -> Result<Arc<dyn CompatibilityScorer>, UpstreamError> {
    let scorer: Arc<dyn CompatibilityScorer> = match config.strategy {
        Strategy::Local => Arc::new(LocalScorer),
        Strategy::Remote => Arc::new(RemoteScorer::with_config(&config.remote)?),
    };
    debug!(strategy = scorer.name(), "scorer ready");
    Ok(scorer)
}
