//! Affliction (살) analysis: conflictual branch relations between two charts.
//!
//! The analyzer produces dense counts; callers choose how to report them
//! (sparse: positive categories only, dense: all eight fixed slots).

use serde::{Deserialize, Serialize};

use crate::constants::AFFLICTION_SLOTS;
use crate::ganzhi::{Branch, FourPillars};
use crate::relation;

/// The eight fixed affliction slots, in index order.
///
/// The first four are the primary branch relations computed locally. The
/// remaining four are combined categories reported by the remote scoring
/// service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affliction {
    #[serde(rename = "충살")]
    Opposition,
    #[serde(rename = "형살")]
    Punishment,
    #[serde(rename = "파살")]
    Breaking,
    #[serde(rename = "해살")]
    Harm,
    #[serde(rename = "충형살")]
    OppositionPunishment,
    #[serde(rename = "충파살")]
    OppositionBreaking,
    #[serde(rename = "형해살")]
    PunishmentHarm,
    #[serde(rename = "파해살")]
    BreakingHarm,
}

impl Affliction {
    pub const ALL: [Affliction; AFFLICTION_SLOTS] = [
        Affliction::Opposition,
        Affliction::Punishment,
        Affliction::Breaking,
        Affliction::Harm,
        Affliction::OppositionPunishment,
        Affliction::OppositionBreaking,
        Affliction::PunishmentHarm,
        Affliction::BreakingHarm,
    ];

    pub const PRIMARY: [Affliction; 4] = [
        Affliction::Opposition,
        Affliction::Punishment,
        Affliction::Breaking,
        Affliction::Harm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Affliction::Opposition => "충살",
            Affliction::Punishment => "형살",
            Affliction::Breaking => "파살",
            Affliction::Harm => "해살",
            Affliction::OppositionPunishment => "충형살",
            Affliction::OppositionBreaking => "충파살",
            Affliction::PunishmentHarm => "형해살",
            Affliction::BreakingHarm => "파해살",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Affliction::Opposition => "충살은 서로 반대되는 성향으로 인한 갈등을 의미합니다.",
            Affliction::Punishment => "형살은 상호간의 충돌과 다툼을 나타냅니다.",
            Affliction::Breaking => "파살은 관계의 불안정성을 나타냅니다.",
            Affliction::Harm => "해살은 서로 해를 끼치는 요소입니다.",
            Affliction::OppositionPunishment => "충형살은 충돌과 형벌이 결합된 요소입니다.",
            Affliction::OppositionBreaking => "충파살은 충돌과 파괴가 결합된 요소입니다.",
            Affliction::PunishmentHarm => "형해살은 형살과 해살의 결합입니다.",
            Affliction::BreakingHarm => "파해살은 파괴와 해로움이 결합된 요소입니다.",
        }
    }
}

/// Match counts for the four primary relations, counted from chart A's
/// branches against chart B's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfflictionCounts {
    pub opposition: u32,
    pub punishment: u32,
    pub breaking: u32,
    pub harm: u32,
}

impl AfflictionCounts {
    pub fn get(&self, category: Affliction) -> u32 {
        match category {
            Affliction::Opposition => self.opposition,
            Affliction::Punishment => self.punishment,
            Affliction::Breaking => self.breaking,
            Affliction::Harm => self.harm,
            _ => 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.opposition + self.punishment + self.breaking + self.harm
    }
}

/// Count branch relations between two charts. Stems are ignored.
///
/// Opposition, breaking and harm count once per A-branch whose target
/// appears anywhere in B. Punishment counts once per matching target, so a
/// single A-branch can contribute several times.
pub fn analyze(a: &FourPillars, b: &FourPillars) -> AfflictionCounts {
    let lhs = a.branches();
    let rhs = b.branches();
    let hit = |target: Branch| rhs.contains(&target);

    let mut counts = AfflictionCounts::default();
    for &branch in &lhs {
        if hit(relation::opposition(branch)) {
            counts.opposition += 1;
        }
        counts.punishment += relation::punishment(branch)
            .iter()
            .filter(|&&t| hit(t))
            .count() as u32;
        if hit(relation::breaking(branch)) {
            counts.breaking += 1;
        }
        if hit(relation::harm(branch)) {
            counts.harm += 1;
        }
    }
    counts
}

/// Sparse report of `analyze`: positive categories only, in the order
/// opposition, punishment, breaking, harm.
pub fn analyze_sparse(a: &FourPillars, b: &FourPillars) -> Vec<AfflictionMatch> {
    Breakdown::from(analyze(a, b)).report(ReportingMode::Sparse)
}

/// How a breakdown is presented to its consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportingMode {
    /// Only categories with a positive count.
    #[default]
    Sparse,
    /// All eight slots, zeros included.
    Dense,
}

/// One reported affliction category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AfflictionMatch {
    #[serde(rename = "type")]
    pub category: Affliction,
    pub count: f64,
    pub description: &'static str,
}

/// Dense fixed-8 affliction vector. Values are raw, non-negative counts;
/// remote scoring may report fractional severities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown([f64; AFFLICTION_SLOTS]);

impl Breakdown {
    pub fn new(values: [f64; AFFLICTION_SLOTS]) -> Self {
        Self(values)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Affliction) -> f64 {
        self.0[category.index()]
    }

    pub fn values(&self) -> &[f64; AFFLICTION_SLOTS] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Element-wise sum.
    pub fn combine(&self, other: &Breakdown) -> Breakdown {
        let mut out = self.0;
        for (slot, v) in out.iter_mut().zip(other.0) {
            *slot += v;
        }
        Breakdown(out)
    }

    pub fn report(&self, mode: ReportingMode) -> Vec<AfflictionMatch> {
        Affliction::ALL
            .into_iter()
            .map(|category| AfflictionMatch {
                category,
                count: self.get(category),
                description: category.description(),
            })
            .filter(|m| mode == ReportingMode::Dense || m.count > 0.0)
            .collect()
    }
}

impl From<AfflictionCounts> for Breakdown {
    fn from(counts: AfflictionCounts) -> Self {
        let mut values = [0.0; AFFLICTION_SLOTS];
        for category in Affliction::PRIMARY {
            values[category.index()] = f64::from(counts.get(category));
        }
        Breakdown(values)
    }
}
