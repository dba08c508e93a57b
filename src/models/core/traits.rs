//! Trait definitions for domain models
//!
//! This module defines the core traits that all domain models implement,
//! providing common functionality and interfaces for working with models.

use chrono::{Datelike, NaiveDate};
use std::hash::Hash;

/// Age in whole years below which a person counts as a child.
pub const ADULT_AGE_YEARS: i32 = 18;

/// A trait that all domain models must implement.
///
/// The `EntityModel` trait provides common functionality for all models
/// in the system, including identifier access and conversion methods.
/// Identifiers are derived, normalized values, so `id` returns an owned key.
pub trait EntityModel: Clone + Send + Sync + std::fmt::Debug {
    /// The type of identifier used for this model
    type Id: Clone + Eq + Hash + Send + Sync + std::fmt::Debug;

    /// Get the unique identifier for this model
    fn id(&self) -> Self::Id;

    /// Create a unique key string representation of the identifier
    fn key(&self) -> String;
}

/// A trait for records that carry a birthdate.
///
/// `AgeProfile` owns the age rule: age is the number of whole calendar years
/// between the birthdate and a reference date. Absence of a birthdate leaves
/// every age-dependent computation undefined (`None`).
pub trait AgeProfile {
    /// The recorded birthdate, if any
    fn birth_date(&self) -> Option<NaiveDate>;

    /// Calculate age in whole years at a specific reference date.
    ///
    /// Calendar-year difference, adjusted down by one when the birthday has
    /// not yet occurred in the reference year. Leap-day birthdates age on
    /// March 1st in non-leap years. `None` without a birthdate or when the
    /// birthdate lies after the reference date.
    fn age_at(&self, reference_date: &NaiveDate) -> Option<i32> {
        let birth_date = self.birth_date()?;
        if birth_date > *reference_date {
            return None;
        }

        let years = reference_date.year() - birth_date.year();
        let adjustment = if reference_date.month() < birth_date.month()
            || (reference_date.month() == birth_date.month()
                && reference_date.day() < birth_date.day())
        {
            1
        } else {
            0
        };

        Some(years - adjustment)
    }

    /// Whether the person counts as a child (strictly under 18) at the date.
    fn is_child_at(&self, reference_date: &NaiveDate) -> Option<bool> {
        self.age_at(reference_date).map(|age| age < ADULT_AGE_YEARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dated(Option<NaiveDate>);

    impl AgeProfile for Dated {
        fn birth_date(&self) -> Option<NaiveDate> {
            self.0
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_at_counts_whole_years() {
        let profile = Dated(Some(date(2000, 6, 15)));
        assert_eq!(profile.age_at(&date(2020, 6, 14)), Some(19));
        assert_eq!(profile.age_at(&date(2020, 6, 15)), Some(20));
        assert_eq!(profile.age_at(&date(2020, 6, 16)), Some(20));
    }

    #[test]
    fn test_age_boundary_exactly_eighteen_is_adult() {
        let profile = Dated(Some(date(2002, 3, 1)));
        assert_eq!(profile.age_at(&date(2020, 3, 1)), Some(18));
        assert_eq!(profile.is_child_at(&date(2020, 3, 1)), Some(false));
        assert_eq!(profile.is_child_at(&date(2020, 2, 29)), Some(true));
    }

    #[test]
    fn test_leap_day_birthdate() {
        let profile = Dated(Some(date(2004, 2, 29)));
        // Non-leap year: still 17 on Feb 28, 18 from Mar 1.
        assert_eq!(profile.age_at(&date(2022, 2, 28)), Some(17));
        assert_eq!(profile.age_at(&date(2022, 3, 1)), Some(18));
    }

    #[test]
    fn test_age_undefined_without_birthdate() {
        assert_eq!(Dated(None).age_at(&date(2020, 1, 1)), None);
        assert_eq!(Dated(None).is_child_at(&date(2020, 1, 1)), None);
    }

    #[test]
    fn test_age_undefined_before_birth() {
        let profile = Dated(Some(date(2020, 1, 1)));
        assert_eq!(profile.age_at(&date(2019, 12, 31)), None);
    }
}
