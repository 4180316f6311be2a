//! [`Attendance`] definitions.

use std::fmt;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{Display, Error, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::Employee;

/// Working day of an [`Employee`].
///
/// There is at most one [`Attendance`] per [`Employee`] and [`Date`].
#[derive(Clone, Debug)]
pub struct Attendance {
    /// ID of this [`Attendance`].
    pub id: Id,

    /// [`employee::Number`] of the attending [`Employee`].
    pub employee_id: employee::Number,

    /// [`Date`] of this [`Attendance`].
    pub date: Date,

    /// [`Punch`] of the [`Employee`] starting the day.
    pub check_in: Option<Punch>,

    /// [`Punch`] of the [`Employee`] ending the day.
    pub check_out: Option<Punch>,

    /// [`Hours`] worked between [`Attendance::check_in`] and
    /// [`Attendance::check_out`].
    pub working_hours: Hours,

    /// Part of [`Attendance::working_hours`] exceeding a standard day.
    pub overtime_hours: Hours,

    /// [`Status`] of this [`Attendance`].
    pub status: Status,

    /// Free-form notes.
    pub notes: Option<String>,

    /// Indicator whether this [`Attendance`] was recorded manually rather
    /// than by [`Punch`]es.
    pub is_manual_entry: bool,

    /// [`DateTime`] when this [`Attendance`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Attendance`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Attendance {
    /// Records the provided check-in [`Punch`].
    ///
    /// # Errors
    ///
    /// If this [`Attendance`] is checked in already.
    pub fn check_in(&mut self, punch: Punch) -> Result<(), PunchError> {
        if self.check_in.is_some() {
            return Err(PunchError::AlreadyCheckedIn);
        }
        self.check_in = Some(punch);
        Ok(())
    }

    /// Records the provided check-out [`Punch`] and recalculates the worked
    /// [`Hours`].
    ///
    /// # Errors
    ///
    /// If this [`Attendance`] isn't checked in yet, is checked out already,
    /// or the [`Punch`] precedes the check-in.
    pub fn check_out(&mut self, punch: Punch) -> Result<(), PunchError> {
        if self.check_in.is_none() {
            return Err(PunchError::NotCheckedIn);
        }
        if self.check_out.is_some() {
            return Err(PunchError::AlreadyCheckedOut);
        }
        let (working, overtime) = Hours::worked(self.check_in, Some(punch))?;
        self.check_out = Some(punch);
        self.working_hours = working;
        self.overtime_hours = overtime;
        Ok(())
    }

    /// Recalculates [`Attendance::working_hours`] and
    /// [`Attendance::overtime_hours`] from the current [`Punch`]es.
    ///
    /// # Errors
    ///
    /// If the [`Punch`]es are inconsistent.
    pub fn recalculate(&mut self) -> Result<(), PunchError> {
        let (working, overtime) =
            Hours::worked(self.check_in, self.check_out)?;
        self.working_hours = working;
        self.overtime_hours = overtime;
        Ok(())
    }
}

define_id! {
    #[doc = "ID of an [`Attendance`]."]
    Id
}

/// Selector of the [`Attendance`] of an [`Employee`] on a [`Date`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Day {
    /// [`employee::Number`] of the [`Employee`].
    pub employee_id: employee::Number,

    /// [`Date`] of the [`Attendance`].
    pub date: Date,
}

/// Clocking of an [`Employee`] in or out.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Punch {
    /// [`DateTime`] of this [`Punch`].
    #[serde(rename = "time")]
    pub at: PunchDateTime,

    /// [`WorkLocation`] of this [`Punch`].
    #[serde(default)]
    pub location: WorkLocation,
}

/// Number of hours worked during an [`Attendance`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(transparent)]
pub struct Hours(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Hours {
    /// Length of a standard working day, after which overtime starts.
    pub const STANDARD_DAY: Self =
        Self(Decimal::from_parts(8, 0, 0, false, 0));

    /// Zero [`Hours`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Calculates working and overtime [`Hours`] between the provided
    /// [`Punch`]es, rounded to hundredths.
    ///
    /// Zero [`Hours`] are returned until both [`Punch`]es are present.
    ///
    /// # Errors
    ///
    /// If there is a check-out without a check-in, or the check-out precedes
    /// the check-in.
    pub fn worked(
        check_in: Option<Punch>,
        check_out: Option<Punch>,
    ) -> Result<(Self, Self), PunchError> {
        let (check_in, check_out) = match (check_in, check_out) {
            (Some(i), Some(o)) => (i, o),
            (None, Some(_)) => return Err(PunchError::NotCheckedIn),
            (_, None) => return Ok((Self::ZERO, Self::ZERO)),
        };

        let seconds = check_out.at.seconds_since(&check_in.at);
        if seconds < 0 {
            return Err(PunchError::CheckOutBeforeCheckIn);
        }
        let working =
            Self((Decimal::from(seconds) / Decimal::from(3600)).round_dp(2));
        let overtime = (working.0 - Self::STANDARD_DAY.0).max(Decimal::ZERO);
        Ok((working, Self(overtime)))
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Error of an inconsistent [`Punch`] of an [`Attendance`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum PunchError {
    /// [`Attendance`] is checked in already.
    #[display("Already checked in today")]
    AlreadyCheckedIn,

    /// [`Attendance`] has no check-in.
    #[display("No check-in record found for today")]
    NotCheckedIn,

    /// [`Attendance`] is checked out already.
    #[display("Already checked out today")]
    AlreadyCheckedOut,

    /// Check-out precedes check-in.
    #[display("Check-out must not be before check-in")]
    CheckOutBeforeCheckIn,
}

define_kind! {
    #[doc = "Status of an [`Attendance`]."]
    enum Status {
        #[doc = "[`Employee`] is present."]
        Present = 1,

        #[doc = "[`Employee`] is absent."]
        Absent = 2,

        #[doc = "[`Employee`] came late."]
        Late = 3,

        #[doc = "[`Employee`] worked half of the day."]
        HalfDay = 4,

        #[doc = "[`Employee`] is on leave."]
        OnLeave = 5,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Present
    }
}

define_kind! {
    #[doc = "Place a [`Punch`] is made at."]
    enum WorkLocation {
        #[doc = "Company office."]
        Office = 1,

        #[doc = "Remote work."]
        Remote = 2,

        #[doc = "Field work."]
        Field = 3,
    }
}

impl Default for WorkLocation {
    fn default() -> Self {
        Self::Office
    }
}

/// [`DateTime`] of a [`Punch`].
pub type PunchDateTime = DateTimeOf<(Attendance, Punch)>;

/// [`DateTime`] when an [`Attendance`] was created.
pub type CreationDateTime = DateTimeOf<(Attendance, unit::Creation)>;

/// [`DateTime`] when an [`Attendance`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Attendance, unit::Modification)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{Hours, Punch, PunchError, WorkLocation};

    fn punch(at: &str) -> Punch {
        Punch {
            at: DateTime::from_rfc3339(at).unwrap().coerce(),
            location: WorkLocation::Office,
        }
    }

    #[test]
    fn counts_hours_between_punches() {
        let (working, overtime) = Hours::worked(
            Some(punch("2024-07-01T09:00:00Z")),
            Some(punch("2024-07-01T16:45:00Z")),
        )
        .unwrap();

        assert_eq!(working.to_string(), "7.75");
        assert_eq!(overtime, Hours::ZERO);
    }

    #[test]
    fn counts_overtime_past_standard_day() {
        let (working, overtime) = Hours::worked(
            Some(punch("2024-07-01T08:00:00Z")),
            Some(punch("2024-07-01T18:20:00Z")),
        )
        .unwrap();

        assert_eq!(working.to_string(), "10.33");
        assert_eq!(overtime.to_string(), "2.33");
    }

    #[test]
    fn needs_both_punches() {
        assert_eq!(
            Hours::worked(Some(punch("2024-07-01T08:00:00Z")), None),
            Ok((Hours::ZERO, Hours::ZERO)),
        );
        assert_eq!(
            Hours::worked(None, Some(punch("2024-07-01T08:00:00Z"))),
            Err(PunchError::NotCheckedIn),
        );
    }

    #[test]
    fn rejects_check_out_before_check_in() {
        assert_eq!(
            Hours::worked(
                Some(punch("2024-07-01T18:00:00Z")),
                Some(punch("2024-07-01T08:00:00Z")),
            ),
            Err(PunchError::CheckOutBeforeCheckIn),
        );
    }
}
