use std::fmt;

/// Which input field a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    BirthDate,
    BirthTime,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Gender,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::BirthDate => "birthDate",
            Field::BirthTime => "birthTime",
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Gender => "gender",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Malformed or out-of-range birth input. Raised before any computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    Missing(Field),
    Malformed { field: Field, value: String },
    OutOfRange {
        field: Field,
        value: i64,
        min: i64,
        max: i64,
    },
    UnknownGender(String),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::Malformed { field, .. } => *field,
            ValidationError::OutOfRange { field, .. } => *field,
            ValidationError::UnknownGender(_) => Field::Gender,
        }
    }

    /// Fail with `OutOfRange` unless `min <= value <= max`.
    pub(crate) fn check_range(field: Field, value: i64, min: i64, max: i64) -> Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing(field) => write!(f, "{field} is required"),
            ValidationError::Malformed { field, value } => match field {
                Field::BirthDate => write!(f, "{field} must be YYYY-MM-DD, got {value:?}"),
                Field::BirthTime => write!(f, "{field} must be HH:MM, got {value:?}"),
                _ => write!(f, "{field} is malformed: {value:?}"),
            },
            ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be between {min} and {max}, got {value}"),
            ValidationError::UnknownGender(value) => {
                write!(f, "gender must be 남/여 (male/female), got {value:?}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Which of the two people an input error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("person 1"),
            Side::B => f.write_str("person 2"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreError {
    Invalid { side: Side, error: ValidationError },
}

impl ScoreError {
    pub fn side(&self) -> Side {
        match self {
            ScoreError::Invalid { side, .. } => *side,
        }
    }

    pub fn validation(&self) -> &ValidationError {
        match self {
            ScoreError::Invalid { error, .. } => error,
        }
    }
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Invalid { side, error } => write!(f, "{side}: {error}"),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Invalid { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_field() {
        let err = ValidationError::check_range(Field::Month, 13, 1, 12).unwrap_err();
        assert_eq!(err.field(), Field::Month);
        assert_eq!(err.to_string(), "month must be between 1 and 12, got 13");
    }

    #[test]
    fn test_in_range_passes() {
        assert!(ValidationError::check_range(Field::Hour, 0, 0, 23).is_ok());
        assert!(ValidationError::check_range(Field::Hour, 23, 0, 23).is_ok());
    }

    #[test]
    fn test_score_error_prefixes_side() {
        let err = ScoreError::Invalid {
            side: Side::B,
            error: ValidationError::Missing(Field::BirthDate),
        };
        assert_eq!(err.to_string(), "person 2: birthDate is required");
        assert_eq!(err.validation().field(), Field::BirthDate);
    }
}
