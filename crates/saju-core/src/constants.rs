/// Year whose pillar is 갑자 (first stem, first branch).
pub const REFERENCE_YEAR: i32 = 1984;

/// Day-pillar epoch (year, month, day); day 0 is 갑자.
pub const DAY_EPOCH: (i32, u32, u32) = (1900, 1, 1);

/// lcm(10, 12): stems and branches realign every 60 steps.
pub const SEXAGENARY_CYCLE: i32 = 60;

/// Supported birth-year range (inclusive)
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Hour used when no birth time is given
pub const DEFAULT_HOUR: u32 = 12;

// ---------------------------------------------------------------------------
// Local scoring weights
// ---------------------------------------------------------------------------

/// Starting score before adjustments
pub const BASE_SCORE: f64 = 100.0;

/// Penalty per affliction match, summed across categories
pub const AFFLICTION_PENALTY: f64 = 10.0;

/// Penalty per destructive element pairing
pub const DESTRUCTIVE_PENALTY: f64 = 2.0;

/// Bonus per generative element pairing
pub const GENERATIVE_BONUS: f64 = 1.0;

/// Cap on the total generative bonus
pub const GENERATIVE_BONUS_CAP: f64 = 10.0;

/// Opposite-sex pair bonus
pub const GENDER_BONUS: f64 = 5.0;

/// Per-person bonus when day-stem polarity suits the stated gender
pub const POLARITY_BONUS: f64 = 3.0;

/// Name elements in a generative relation
pub const NAME_GENERATIVE_BONUS: f64 = 3.0;

/// Name elements in a destructive relation
pub const NAME_DESTRUCTIVE_PENALTY: f64 = 2.0;

/// Bonus when the two names' stroke counts are close
pub const NAME_STROKE_BONUS: f64 = 2.0;

/// Maximum stroke difference that still earns `NAME_STROKE_BONUS`
pub const NAME_STROKE_TOLERANCE: u32 = 5;

/// Score bounds
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Tier thresholds (inclusive lower bounds)
pub const TIER_VERY_GOOD: f64 = 80.0;
pub const TIER_ACCEPTABLE: f64 = 60.0;
pub const TIER_AVERAGE: f64 = 40.0;

/// Number of fixed affliction slots in the dense breakdown
pub const AFFLICTION_SLOTS: usize = 8;
