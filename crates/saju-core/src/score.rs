//! Local compatibility scoring pipeline.
//!
//! Start at 100, subtract for afflictions and destructive element pairings,
//! add a capped generative bonus plus gender, polarity and name adjustments,
//! then clamp to [0, 100] and round to one decimal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::affliction::{self, AfflictionCounts, AfflictionMatch, Breakdown, ReportingMode};
use crate::constants::*;
use crate::element::{ElementTally, analyze_elements, is_destructive_pair, is_generative_pair};
use crate::error::{ScoreError, Side};
use crate::ganzhi::FourPillars;
use crate::input::{BirthInput, Gender, ParsedBirth};
use crate::name::{name_element, strokes};

/// Explanation tier selected by score threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    VeryGood,
    Acceptable,
    Average,
    Caution,
}

impl Tier {
    pub fn for_score(score: f64) -> Self {
        if score >= TIER_VERY_GOOD {
            Tier::VeryGood
        } else if score >= TIER_ACCEPTABLE {
            Tier::Acceptable
        } else if score >= TIER_AVERAGE {
            Tier::Average
        } else {
            Tier::Caution
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Tier::VeryGood => {
                "매우 좋은 궁합입니다. 서로 잘 어울리며 행복한 관계를 이어갈 수 있습니다."
            }
            Tier::Acceptable => "무난한 궁합입니다. 서로 노력하면 좋은 관계를 유지할 수 있습니다.",
            Tier::Average => {
                "보통의 궁합입니다. 서로 이해하고 양보하면 관계를 발전시킬 수 있습니다."
            }
            Tier::Caution => "주의가 필요한 궁합입니다. 서로의 차이를 인정하고 소통이 중요합니다.",
        }
    }
}

/// Where a score came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Local,
    Remote,
    /// Neutral default substituted for a failed remote call.
    Fallback,
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Local => f.write_str("local"),
            ScoreSource::Remote => f.write_str("remote"),
            ScoreSource::Fallback => f.write_str("fallback"),
        }
    }
}

/// Every additive contribution to a local score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub afflictions: AfflictionCounts,
    pub elements: ElementTally,
    pub affliction_penalty: f64,
    pub destructive_penalty: f64,
    pub generative_bonus: f64,
    pub gender_bonus: f64,
    pub polarity_bonus: f64,
    pub name_adjustment: f64,
    /// Sum before clamping.
    pub raw: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    /// Clamped to [0, 100], one decimal place.
    pub score: f64,
    pub tier: Tier,
    pub explanation: String,
    #[serde(rename = "saju1")]
    pub pillars_a: FourPillars,
    #[serde(rename = "saju2")]
    pub pillars_b: FourPillars,
    pub breakdown: Breakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ScoreComponents>,
    pub source: ScoreSource,
}

impl CompatibilityResult {
    /// Assemble a result from an unclamped score; the tier follows the
    /// clamped, rounded value.
    pub fn new(
        raw_score: f64,
        pillars_a: FourPillars,
        pillars_b: FourPillars,
        breakdown: Breakdown,
        source: ScoreSource,
    ) -> Self {
        let score = finalize_score(raw_score);
        let tier = Tier::for_score(score);
        Self {
            score,
            tier,
            explanation: tier.explanation().to_string(),
            pillars_a,
            pillars_b,
            breakdown,
            components: None,
            source,
        }
    }

    /// Neutral result used when remote scoring is unavailable: score 100,
    /// every affliction slot zero.
    pub fn fallback(pillars_a: FourPillars, pillars_b: FourPillars) -> Self {
        Self::new(
            MAX_SCORE,
            pillars_a,
            pillars_b,
            Breakdown::zero(),
            ScoreSource::Fallback,
        )
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ScoreSource::Fallback
    }

    pub fn afflictions(&self, mode: ReportingMode) -> Vec<AfflictionMatch> {
        self.breakdown.report(mode)
    }
}

/// Clamp to [0, 100] and round to one decimal place. NaN maps to 0.
pub fn finalize_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_SCORE;
    }
    (raw.clamp(MIN_SCORE, MAX_SCORE) * 10.0).round() / 10.0
}

/// Validate both people, tagging any error with the side it came from.
pub fn parse_pair(
    a: &BirthInput,
    b: &BirthInput,
) -> Result<((ParsedBirth, FourPillars), (ParsedBirth, FourPillars)), ScoreError> {
    let check = |side: Side, input: &BirthInput| {
        input
            .parse()
            .and_then(|parsed| parsed.pillars().map(|pillars| (parsed, pillars)))
            .map_err(|error| ScoreError::Invalid { side, error })
    };
    Ok((check(Side::A, a)?, check(Side::B, b)?))
}

/// Score two people with the local engine.
pub fn score_local(a: &BirthInput, b: &BirthInput) -> Result<CompatibilityResult, ScoreError> {
    let ((birth_a, pillars_a), (birth_b, pillars_b)) = parse_pair(a, b)?;
    Ok(score_parsed(&birth_a, &pillars_a, &birth_b, &pillars_b))
}

/// Local pipeline over already-validated inputs.
pub fn score_parsed(
    birth_a: &ParsedBirth,
    pillars_a: &FourPillars,
    birth_b: &ParsedBirth,
    pillars_b: &FourPillars,
) -> CompatibilityResult {
    let afflictions = affliction::analyze(pillars_a, pillars_b);
    let elements = analyze_elements(pillars_a, pillars_b);

    let affliction_penalty = AFFLICTION_PENALTY * f64::from(afflictions.total());
    let destructive_penalty = DESTRUCTIVE_PENALTY * f64::from(elements.destructive);
    let generative_bonus =
        (GENERATIVE_BONUS * f64::from(elements.generative)).min(GENERATIVE_BONUS_CAP);
    let gender_bonus = gender_bonus(birth_a.gender, birth_b.gender);
    let polarity_bonus =
        polarity_bonus(pillars_a, birth_a.gender) + polarity_bonus(pillars_b, birth_b.gender);
    let name_adjustment = match (&birth_a.name, &birth_b.name) {
        (Some(x), Some(y)) => name_adjustment(x, y),
        _ => 0.0,
    };

    let raw = BASE_SCORE - affliction_penalty - destructive_penalty
        + generative_bonus
        + gender_bonus
        + polarity_bonus
        + name_adjustment;

    let mut result = CompatibilityResult::new(
        raw,
        *pillars_a,
        *pillars_b,
        Breakdown::from(afflictions),
        ScoreSource::Local,
    );
    result.components = Some(ScoreComponents {
        afflictions,
        elements,
        affliction_penalty,
        destructive_penalty,
        generative_bonus,
        gender_bonus,
        polarity_bonus,
        name_adjustment,
        raw,
    });
    result
}

fn gender_bonus(a: Option<Gender>, b: Option<Gender>) -> f64 {
    match (a, b) {
        (Some(x), Some(y)) if x != y => GENDER_BONUS,
        _ => 0.0,
    }
}

fn polarity_bonus(pillars: &FourPillars, gender: Option<Gender>) -> f64 {
    match gender {
        Some(g) if pillars.day_polarity() == g.preferred_polarity() => POLARITY_BONUS,
        _ => 0.0,
    }
}

fn name_adjustment(a: &str, b: &str) -> f64 {
    let (ea, eb) = (name_element(a), name_element(b));
    let mut adjustment = 0.0;
    if is_generative_pair(ea, eb) {
        adjustment += NAME_GENERATIVE_BONUS;
    }
    if is_destructive_pair(ea, eb) {
        adjustment -= NAME_DESTRUCTIVE_PENALTY;
    }
    if strokes(a).abs_diff(strokes(b)) <= NAME_STROKE_TOLERANCE {
        adjustment += NAME_STROKE_BONUS;
    }
    adjustment
}
