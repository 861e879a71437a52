//! Gregorian date/time → four pillars.
//!
//! Simplified conversion: the month pillar follows calendar months rather
//! than solar-term boundaries, and the day pillar counts civil days from
//! 1900-01-01 with no timezone adjustment. Both are known approximations.

use crate::constants::{
    DAY_EPOCH, DEFAULT_HOUR, MAX_YEAR, MIN_YEAR, REFERENCE_YEAR, SEXAGENARY_CYCLE,
};
use crate::error::{Field, ValidationError};
use crate::ganzhi::{Branch, FourPillars, Pillar, Stem};

/// Month branch by calendar month: January → 인, ..., December → 축.
const MONTH_BRANCHES: [Branch; 12] = [
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
    Branch::Ja,
    Branch::Chuk,
];

/// Convert a civil timestamp into its four pillars.
///
/// Accepts `1900 ≤ year ≤ 2100`, `1 ≤ month ≤ 12`, `1 ≤ day ≤ 31`,
/// `0 ≤ hour ≤ 23`. A day past the end of its month rolls into the next
/// month (`2023-02-31` is treated as `2023-03-03`).
pub fn convert(year: i32, month: u32, day: u32, hour: u32) -> Result<FourPillars, ValidationError> {
    ValidationError::check_range(Field::Year, year.into(), MIN_YEAR.into(), MAX_YEAR.into())?;
    ValidationError::check_range(Field::Month, month.into(), 1, 12)?;
    ValidationError::check_range(Field::Day, day.into(), 1, 31)?;
    ValidationError::check_range(Field::Hour, hour.into(), 0, 23)?;

    let year_pillar = year_pillar(year);
    let month_pillar = month_pillar(year_pillar.stem, month);
    let day_pillar = day_pillar(year, month, day);
    let hour_pillar = hour_pillar(day_pillar.stem, hour);

    Ok(FourPillars {
        year: year_pillar,
        month: month_pillar,
        day: day_pillar,
        hour: hour_pillar,
    })
}

/// `convert` with the default hour (noon).
pub fn convert_default_hour(year: i32, month: u32, day: u32) -> Result<FourPillars, ValidationError> {
    convert(year, month, day, DEFAULT_HOUR)
}

/// 1984 is 갑자; every year steps one place along the 60-cycle.
fn year_pillar(year: i32) -> Pillar {
    let offset = (year - REFERENCE_YEAR).rem_euclid(SEXAGENARY_CYCLE);
    Pillar::from_cycle(offset as usize)
}

fn month_pillar(year_stem: Stem, month: u32) -> Pillar {
    let branch = MONTH_BRANCHES[(month - 1) as usize];
    let stem = Stem::from_index(year_stem.index() * 2 + month as usize);
    Pillar::new(stem, branch)
}

fn day_pillar(year: i32, month: u32, day: u32) -> Pillar {
    let diff = days_since_epoch(year, month, day);
    Pillar::from_cycle(diff.rem_euclid(SEXAGENARY_CYCLE as i64) as usize)
}

/// Double-hour (시) system: 자 spans 23:00–00:59, 축 01:00–02:59, and so on.
fn hour_pillar(day_stem: Stem, hour: u32) -> Pillar {
    let branch_index = ((hour + 1) / 2 % 12) as usize;
    let stem = Stem::from_index(day_stem.index() * 2 + branch_index);
    Pillar::new(stem, Branch::from_index(branch_index))
}

/// Whole civil days between 1900-01-01 and the given date.
pub fn days_since_epoch(year: i32, month: u32, day: u32) -> i64 {
    let (ey, em, ed) = DAY_EPOCH;
    let epoch = days_from_civil(ey, em, 1) + i64::from(ed) - 1;
    days_from_civil(year, month, 1) + i64::from(day) - 1 - epoch
}

/// Howard Hinnant's days_from_civil: (year, month, day) → days since
/// 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}
