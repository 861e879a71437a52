use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::calendar::convert;
use crate::constants::{DEFAULT_HOUR, MAX_YEAR, MIN_YEAR};
use crate::element::Polarity;
use crate::error::{Field, ValidationError};
use crate::ganzhi::FourPillars;

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap());
static TIME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,2})(?::(\d{2}))?$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남")]
    Male,
    #[serde(rename = "여")]
    Female,
}

impl Gender {
    /// Day-stem polarity traditionally preferred for this gender.
    pub fn preferred_polarity(self) -> Polarity {
        match self {
            Gender::Male => Polarity::Yang,
            Gender::Female => Polarity::Yin,
        }
    }

    /// Binary flag used by the remote scoring service (1 = male, 0 = female).
    pub fn flag(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("남"),
            Gender::Female => f.write_str("여"),
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "남" | "male" | "m" => Ok(Gender::Male),
            "여" | "female" | "f" => Ok(Gender::Female),
            _ => Err(ValidationError::UnknownGender(s.to_string())),
        }
    }
}

/// Raw birth information as entered by a user. Only the date is required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl BirthInput {
    pub fn new(birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.birth_time = Some(time.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Validate every field. Blank optional strings count as absent, and so
    /// does a gender that is neither male nor female.
    pub fn parse(&self) -> Result<ParsedBirth, ValidationError> {
        let (year, month, day) = parse_date(&self.birth_date)?;
        let hour = match non_blank(self.birth_time.as_deref()) {
            Some(time) => parse_hour(time)?,
            None => DEFAULT_HOUR,
        };
        let gender = non_blank(self.gender.as_deref()).and_then(|g| g.parse::<Gender>().ok());
        let name = non_blank(self.name.as_deref()).map(str::to_string);

        Ok(ParsedBirth {
            year,
            month,
            day,
            hour,
            name,
            gender,
        })
    }
}

/// Validated birth input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedBirth {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub name: Option<String>,
    pub gender: Option<Gender>,
}

impl ParsedBirth {
    pub fn pillars(&self) -> Result<FourPillars, ValidationError> {
        convert(self.year, self.month, self.day, self.hour)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(raw: &str) -> Result<(i32, u32, u32), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(Field::BirthDate));
    }
    let malformed = || ValidationError::Malformed {
        field: Field::BirthDate,
        value: raw.to_string(),
    };
    let caps = DATE.captures(trimmed).ok_or_else(malformed)?;
    let year: i32 = caps[1].parse().map_err(|_| malformed())?;
    let month: u32 = caps[2].parse().map_err(|_| malformed())?;
    let day: u32 = caps[3].parse().map_err(|_| malformed())?;

    ValidationError::check_range(Field::Year, year.into(), MIN_YEAR.into(), MAX_YEAR.into())?;
    ValidationError::check_range(Field::Month, month.into(), 1, 12)?;
    ValidationError::check_range(Field::Day, day.into(), 1, 31)?;
    Ok((year, month, day))
}

fn parse_hour(raw: &str) -> Result<u32, ValidationError> {
    let malformed = || ValidationError::Malformed {
        field: Field::BirthTime,
        value: raw.to_string(),
    };
    let caps = TIME.captures(raw).ok_or_else(malformed)?;
    let hour: u32 = caps[1].parse().map_err(|_| malformed())?;
    ValidationError::check_range(Field::Hour, hour.into(), 0, 23)?;
    if let Some(minute) = caps.get(2) {
        let minute: u32 = minute.as_str().parse().map_err(|_| malformed())?;
        ValidationError::check_range(Field::Minute, minute.into(), 0, 59)?;
    }
    Ok(hour)
}
