//! Request/response shapes for the external advice generator.
//!
//! The advice service itself lives outside this crate; these types only fix
//! the JSON it receives and returns.

use serde::{Deserialize, Serialize};

use crate::affliction::{AfflictionMatch, ReportingMode};
use crate::ganzhi::FourPillars;
use crate::input::BirthInput;
use crate::score::CompatibilityResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub score: f64,
    pub explanation: String,
    pub sal_analysis: Vec<AfflictionMatch>,
    pub user1: BirthInput,
    pub user2: BirthInput,
    pub saju1: FourPillars,
    pub saju2: FourPillars,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ChatMessage>,
}

impl AdviceRequest {
    pub fn new(
        result: &CompatibilityResult,
        user1: &BirthInput,
        user2: &BirthInput,
        mode: ReportingMode,
    ) -> Self {
        Self {
            score: result.score,
            explanation: result.explanation.clone(),
            sal_analysis: result.afflictions(mode),
            user1: user1.clone(),
            user2: user2.clone(),
            saju1: result.pillars_a,
            saju2: result.pillars_b,
            messages: Vec::new(),
        }
    }

    /// Attach a running chat transcript.
    pub fn with_transcript(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}
