//! [`Employee`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Amount, Date, DateTimeOf};
use derive_more::{AsRef, Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{department, Email};

/// Employee of the organization.
#[derive(Clone, Debug)]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: Id,

    /// Business [`Number`] of this [`Employee`], unique across all of them.
    pub number: Number,

    /// First [`Name`] of this [`Employee`].
    pub first_name: Name,

    /// Last [`Name`] of this [`Employee`].
    pub last_name: Name,

    /// Work [`Email`] of this [`Employee`], unique across all of them.
    pub email: Email,

    /// [`Phone`] number of this [`Employee`].
    pub phone: Option<Phone>,

    /// [`department::Name`] of the department this [`Employee`] works in.
    pub department: department::Name,

    /// [`Position`] this [`Employee`] holds.
    pub position: Option<Position>,

    /// [`Manager`] of this [`Employee`].
    pub manager: Option<Manager>,

    /// [`Date`] when this [`Employee`] was hired.
    pub hire_date: Option<Date>,

    /// Base salary of this [`Employee`].
    pub salary: Option<Amount>,

    /// Employment [`Status`] of this [`Employee`].
    pub status: Status,

    /// [`DateTime`] when this [`Employee`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Employee`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id! {
    #[doc = "ID of an [`Employee`]."]
    Id
}

define_text! {
    #[doc = "Business number of an [`Employee`] (like `EMP-0042`), exposed \
             as `employeeId`."]
    Number(max = 64)
}

define_text! {
    #[doc = "Name of an [`Employee`]."]
    Name(max = 256)
}

define_text! {
    #[doc = "Position (job title) of an [`Employee`]."]
    Position(max = 256)
}

define_text! {
    #[doc = "Reference to a manager of an [`Employee`]."]
    Manager(max = 256)
}

/// Phone number of an [`Employee`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([+]?\d{1,2}[-\s]?|)\d{3}[-\s]?\d{3}[-\s]?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

impl TryFrom<String> for Phone {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

define_kind! {
    #[doc = "Employment status of an [`Employee`]."]
    enum Status {
        #[doc = "[`Employee`] is actively working."]
        Active = 1,

        #[doc = "[`Employee`] is temporarily not working."]
        Inactive = 2,

        #[doc = "[`Employee`] is on a leave."]
        OnLeave = 3,

        #[doc = "[`Employee`] has left the organization."]
        Terminated = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

/// [`DateTime`] when an [`Employee`] was created.
pub type CreationDateTime = DateTimeOf<(Employee, unit::Creation)>;

/// [`DateTime`] when an [`Employee`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Employee, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Number, Phone, Status};

    #[test]
    fn number_must_be_trimmed_and_non_empty() {
        assert!(Number::new("EMP-001").is_some());
        assert!(Number::new("").is_none());
        assert!(Number::new(" EMP-001").is_none());
        assert!(Number::new("x".repeat(65)).is_none());
    }

    #[test]
    fn phone_formats() {
        assert!(Phone::new("555-123-4567").is_some());
        assert!(Phone::new("+1 555 123 4567").is_some());
        assert!(Phone::new("5551234567").is_some());
        assert!(Phone::new("call me").is_none());
    }

    #[test]
    fn status_text_representation() {
        assert_eq!(Status::OnLeave.to_string(), "ON_LEAVE");
        assert_eq!("TERMINATED".parse::<Status>().unwrap(), Status::Terminated);
        assert!("terminated".parse::<Status>().is_err());
        assert_eq!(Status::default(), Status::Active);
    }
}
