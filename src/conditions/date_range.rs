//! Date range condition

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};

use crate::conditions::ConditionError;

/// The evaluation instant lies inside an inclusive validity window.
///
/// Missing bounds are open. With neither bound the condition always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRangeCondition {
    valid_from: Option<Timestamp>,
    valid_to: Option<Timestamp>,
}

impl DateRangeCondition {
    /// Create a validity window.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::InvertedDateRange`] if `valid_to` is before `valid_from`.
    pub fn new(
        valid_from: Option<Timestamp>,
        valid_to: Option<Timestamp>,
    ) -> Result<Self, ConditionError> {
        match (valid_from, valid_to) {
            (Some(from), Some(to)) if to < from => {
                return Err(ConditionError::InvertedDateRange { from, to });
            }
            _ => {}
        }

        Ok(Self {
            valid_from,
            valid_to,
        })
    }

    /// Create a validity window from RFC 3339 timestamps or `YYYY-MM-DD` dates (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::InvalidTimestamp`] if a bound cannot be parsed, or
    /// [`ConditionError::InvertedDateRange`] if the window is inverted.
    pub fn parse(valid_from: Option<&str>, valid_to: Option<&str>) -> Result<Self, ConditionError> {
        let valid_from = valid_from.map(parse_instant).transpose()?;
        let valid_to = valid_to.map(parse_instant).transpose()?;

        Self::new(valid_from, valid_to)
    }

    /// Returns the start of the window
    pub fn valid_from(&self) -> Option<Timestamp> {
        self.valid_from
    }

    /// Returns the end of the window
    pub fn valid_to(&self) -> Option<Timestamp> {
        self.valid_to
    }

    /// Whether `now` lies inside the window.
    pub fn is_satisfied_at(&self, now: Timestamp) -> bool {
        let after_start = self.valid_from.is_none_or(|from| now >= from);
        let before_end = self.valid_to.is_none_or(|to| now <= to);

        after_start && before_end
    }
}

/// Parse an RFC 3339 timestamp, falling back to a civil datetime or date in UTC.
///
/// A civil datetime keeps its time of day; a bare date means midnight.
pub(crate) fn parse_instant(value: &str) -> Result<Timestamp, ConditionError> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    value
        .parse::<DateTime>()
        .or_else(|_| value.parse::<Date>().map(DateTime::from))
        .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .map_err(|_err| ConditionError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unbounded_window_always_holds() {
        let condition = DateRangeCondition::default();

        assert!(condition.is_satisfied_at(Timestamp::MIN));
        assert!(condition.is_satisfied_at(Timestamp::now()));
        assert!(condition.is_satisfied_at(Timestamp::MAX));
    }

    #[test]
    fn bounds_are_inclusive() -> TestResult {
        let from: Timestamp = "2025-04-01T00:00:00Z".parse()?;
        let to: Timestamp = "2025-04-30T23:59:59Z".parse()?;
        let condition = DateRangeCondition::new(Some(from), Some(to))?;

        assert!(condition.is_satisfied_at(from));
        assert!(condition.is_satisfied_at(to));
        assert!(!condition.is_satisfied_at(from.checked_sub(1.second())?));
        assert!(!condition.is_satisfied_at(to.checked_add(1.second())?));

        Ok(())
    }

    #[test]
    fn open_ended_bounds() -> TestResult {
        let pivot: Timestamp = "2025-06-15T12:00:00Z".parse()?;

        let starts = DateRangeCondition::new(Some(pivot), None)?;
        let ends = DateRangeCondition::new(None, Some(pivot))?;

        assert!(starts.is_satisfied_at(Timestamp::MAX));
        assert!(!starts.is_satisfied_at(Timestamp::MIN));
        assert!(ends.is_satisfied_at(Timestamp::MIN));
        assert!(!ends.is_satisfied_at(Timestamp::MAX));

        Ok(())
    }

    #[test]
    fn parse_accepts_dates_and_timestamps() -> TestResult {
        let condition = DateRangeCondition::parse(Some("2025-04-01"), Some("2025-04-30T18:00:00Z"))?;

        assert_eq!(condition.valid_from(), Some("2025-04-01T00:00:00Z".parse()?));
        assert_eq!(condition.valid_to(), Some("2025-04-30T18:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn parse_keeps_time_of_civil_datetimes() -> TestResult {
        let spaced = DateRangeCondition::parse(None, Some("2025-04-30 18:00:00"))?;
        let separated = DateRangeCondition::parse(Some("2025-04-30T18:00:00"), None)?;
        let expected: Timestamp = "2025-04-30T18:00:00Z".parse()?;

        assert_eq!(spaced.valid_to(), Some(expected));
        assert_eq!(separated.valid_from(), Some(expected));
        assert!(spaced.is_satisfied_at("2025-04-30T12:00:00Z".parse()?));
        assert!(!spaced.is_satisfied_at("2025-04-30T18:00:01Z".parse()?));

        Ok(())
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            DateRangeCondition::parse(Some("next tuesday"), None),
            Err(ConditionError::InvalidTimestamp(value)) if value == "next tuesday"
        ));
    }

    #[test]
    fn rejects_inverted_window() {
        let result = DateRangeCondition::parse(Some("2025-05-01"), Some("2025-04-01"));

        assert!(matches!(result, Err(ConditionError::InvertedDateRange { .. })));
    }
}
