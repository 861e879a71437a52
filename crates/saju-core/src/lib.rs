//! Sexagenary four-pillar (사주) calendar and compatibility engine.
//!
//! Converts Gregorian birth timestamps into year/month/day/hour stem-branch
//! pillars, compares two charts for affliction (살) relations and five-phase
//! element pairings, and combines them into a bounded compatibility score.
//!
//! Zero I/O: lookup tables are constants and every function is pure.

pub mod advice;
pub mod affliction;
pub mod calendar;
pub mod constants;
pub mod element;
pub mod error;
pub mod ganzhi;
pub mod input;
pub mod name;
pub mod relation;
pub mod score;

pub use advice::{AdviceRequest, AdviceResponse, ChatMessage, ChatRole};
pub use affliction::{
    Affliction, AfflictionCounts, AfflictionMatch, Breakdown, ReportingMode, analyze,
    analyze_sparse,
};
pub use calendar::{convert, convert_default_hour};
pub use element::{Element, ElementTally, Polarity, analyze_elements};
pub use error::{Field, ScoreError, Side, ValidationError};
pub use ganzhi::{Branch, FourPillars, Pillar, Stem};
pub use input::{BirthInput, Gender, ParsedBirth};
pub use score::{
    CompatibilityResult, ScoreComponents, ScoreSource, Tier, finalize_score, parse_pair,
    score_local,
};
