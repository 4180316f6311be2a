//! [`Leave`] definitions.

use std::fmt;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{Display, Error, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::Employee;

/// Leave (time off) requested by an [`Employee`].
#[derive(Clone, Debug)]
pub struct Leave {
    /// ID of this [`Leave`].
    pub id: Id,

    /// [`employee::Number`] of the [`Employee`] requesting this [`Leave`].
    pub employee_id: employee::Number,

    /// [`Kind`] of this [`Leave`].
    pub kind: Kind,

    /// [`Date`] this [`Leave`] starts at.
    pub start_date: Option<Date>,

    /// [`Date`] this [`Leave`] ends at (inclusive).
    pub end_date: Option<Date>,

    /// Number of [`Days`] this [`Leave`] lasts.
    ///
    /// Calculated from [`Leave::start_date`] and [`Leave::end_date`].
    pub total_days: Option<Days>,

    /// Indicator whether this [`Leave`] takes a half of a day only.
    pub half_day: bool,

    /// Reason of this [`Leave`].
    pub reason: Option<String>,

    /// [`Status`] of this [`Leave`].
    pub status: Status,

    /// [`Approver`] who approved or rejected this [`Leave`].
    pub approved_by: Option<Approver>,

    /// Comments left on this [`Leave`].
    pub comments: Option<String>,

    /// [`DateTime`] when this [`Leave`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Leave`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Leave {
    /// Approves this [`Leave`] by the provided [`Approver`].
    ///
    /// Overwrites any previous decision.
    pub fn approve(&mut self, by: Option<Approver>) {
        self.status = Status::Approved;
        self.approved_by = by;
    }

    /// Rejects this [`Leave`] by the provided [`Approver`] with the provided
    /// `comments`.
    ///
    /// Overwrites any previous decision and comments.
    pub fn reject(&mut self, by: Option<Approver>, comments: Option<String>) {
        self.status = Status::Rejected;
        self.approved_by = by;
        self.comments = comments;
    }
}

define_id! {
    #[doc = "ID of a [`Leave`]."]
    Id
}

define_text! {
    #[doc = "Reference to a person approving or rejecting a [`Leave`]."]
    Approver(max = 256)
}

define_kind! {
    #[doc = "Kind of a [`Leave`]."]
    enum Kind {
        #[doc = "Annual paid vacation."]
        Annual = 1,

        #[doc = "Sick leave."]
        Sick = 2,

        #[doc = "Personal leave."]
        Personal = 3,

        #[doc = "Maternity leave."]
        Maternity = 4,

        #[doc = "Paternity leave."]
        Paternity = 5,

        #[doc = "Emergency leave."]
        Emergency = 6,

        #[doc = "Unpaid leave."]
        Unpaid = 7,
    }
}

define_kind! {
    #[doc = "Status of a [`Leave`]."]
    enum Status {
        #[doc = "[`Leave`] awaits a decision."]
        Pending = 1,

        #[doc = "[`Leave`] is approved."]
        Approved = 2,

        #[doc = "[`Leave`] is rejected."]
        Rejected = 3,
    }
}

/// Number of days a [`Leave`] lasts.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(transparent)]
pub struct Days(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Days {
    /// Counts inclusive [`Days`] between the provided [`Date`]s.
    ///
    /// A single-day `half_day` period lasts `0.5` days.
    ///
    /// # Errors
    ///
    /// If `start` is after `end`.
    pub fn count(
        start: Date,
        end: Date,
        half_day: bool,
    ) -> Result<Self, InvertedPeriodError> {
        let days = end.days_since(start);
        if days < 0 {
            return Err(InvertedPeriodError { start, end });
        }
        if half_day && days == 0 {
            return Ok(Self(Decimal::new(5, 1)));
        }
        Ok(Self(Decimal::from(days + 1)))
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Error of a [`Leave`] period ending before it starts.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("End date `{end}` must not be before start date `{start}`")]
pub struct InvertedPeriodError {
    /// Start [`Date`] of the period.
    #[error(not(source))]
    pub start: Date,

    /// End [`Date`] of the period.
    #[error(not(source))]
    pub end: Date,
}

/// [`DateTime`] when a [`Leave`] was created.
pub type CreationDateTime = DateTimeOf<(Leave, unit::Creation)>;

/// [`DateTime`] when a [`Leave`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Leave, unit::Modification)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use super::Days;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn counts_days_inclusively() {
        let days =
            Days::count(date("2024-03-04"), date("2024-03-08"), false).unwrap();
        assert_eq!(days.to_string(), "5");

        let days =
            Days::count(date("2024-03-04"), date("2024-03-04"), false).unwrap();
        assert_eq!(days.to_string(), "1");
    }

    #[test]
    fn single_half_day_is_half() {
        let days =
            Days::count(date("2024-03-04"), date("2024-03-04"), true).unwrap();
        assert_eq!(days.to_string(), "0.5");

        let days =
            Days::count(date("2024-03-04"), date("2024-03-05"), true).unwrap();
        assert_eq!(days.to_string(), "2");
    }

    #[test]
    fn rejects_inverted_period() {
        let err = Days::count(date("2024-03-08"), date("2024-03-04"), false)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "End date `2024-03-04` must not be before start date `2024-03-08`",
        );
    }
}
