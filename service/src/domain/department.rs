//! [`Department`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, Amount, Date, DateTimeOf};
use derive_more::{AsRef, Display, Error, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::{Employee, JobPosting};

/// Organization unit [`Employee`]s work in.
#[derive(Clone, Debug)]
pub struct Department {
    /// ID of this [`Department`].
    pub id: Id,

    /// Unique [`Name`] of this [`Department`].
    pub name: Name,

    /// Unique short [`Code`] of this [`Department`].
    pub code: Code,

    /// Description of this [`Department`].
    pub description: Option<String>,

    /// [`employee::Number`] of the [`Employee`] heading this [`Department`].
    pub manager: Option<employee::Number>,

    /// Yearly [`Budget`] of this [`Department`].
    pub budget: Option<Budget>,

    /// [`Location`] of this [`Department`].
    pub location: Option<Location>,

    /// ID of the [`Department`] this one is a part of.
    pub parent: Option<Id>,

    /// Indicator whether this [`Department`] is in use.
    ///
    /// Deleted [`Department`]s are kept inactive.
    pub is_active: bool,

    /// [`Date`] this [`Department`] was established at.
    pub established_date: Option<Date>,

    /// [`DateTime`] when this [`Department`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Department`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id! {
    #[doc = "ID of a [`Department`]."]
    Id
}

define_text! {
    #[doc = "Name of a [`Department`] an [`Employee`] works in or a \
             [`JobPosting`] is opened for."]
    Name(max = 256)
}

define_text! {
    #[doc = "Location of a [`Department`]."]
    Location(max = 256)
}

/// Short unique code of a [`Department`] (like `ENG` or `HR-OPS`).
///
/// Always in upper case.
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
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`] out of the given `code`, if it's valid.
    ///
    /// Lower case letters are converted to upper case.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Option<Self> {
        /// Regular expression checking [`Code`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^[A-Z0-9][A-Z0-9_-]{0,9}$").expect("valid regex")
        });

        let code = code.as_ref().to_uppercase();
        REGEX.is_match(&code).then_some(Self(code))
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

impl TryFrom<String> for Code {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

/// Non-negative budget of a [`Department`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "Amount", into = "Amount")]
pub struct Budget(Amount);

impl Budget {
    /// Creates a new [`Budget`] out of the provided [`Amount`].
    ///
    /// # Errors
    ///
    /// If the [`Amount`] is negative.
    pub fn new(amount: Amount) -> Result<Self, NegativeBudgetError> {
        if amount < Amount::ZERO {
            return Err(NegativeBudgetError);
        }
        Ok(Self(amount))
    }
}

impl TryFrom<Amount> for Budget {
    type Error = NegativeBudgetError;

    fn try_from(amount: Amount) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

/// Error of creating a [`Budget`] out of a negative [`Amount`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("`Department` budget must not be negative")]
pub struct NegativeBudgetError;

/// Selector of active [`Department`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Active;

/// Headcount and salary figures of the active [`Employee`]s of a
/// [`Department`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of active [`Employee`]s.
    pub total_employees: usize,

    /// Average salary of the active [`Employee`]s having one.
    pub average_salary: Amount,

    /// Sum of the salaries of the active [`Employee`]s.
    pub total_salary_budget: Amount,
}

impl Stats {
    /// Calculates [`Stats`] of the provided [`Employee`] salaries, [`None`]
    /// standing for an [`Employee`] without a salary.
    ///
    /// Returns [`None`] if the salaries don't fit into an [`Amount`].
    #[must_use]
    pub fn of(salaries: &[Option<Amount>]) -> Option<Self> {
        let paid = salaries.iter().flatten().copied().collect::<Vec<_>>();
        let total_salary_budget = Amount::checked_sum(paid.iter().copied())?;
        let average_salary = if paid.is_empty() {
            Amount::ZERO
        } else {
            total_salary_budget.checked_split(paid.len())?
        };
        Some(Self {
            total_employees: salaries.len(),
            average_salary,
            total_salary_budget,
        })
    }
}

/// [`DateTime`] when a [`Department`] was created.
pub type CreationDateTime = DateTimeOf<(Department, unit::Creation)>;

/// [`DateTime`] when a [`Department`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Department, unit::Modification)>;

#[cfg(test)]
mod spec {
    use common::Amount;

    use super::{Budget, Code, NegativeBudgetError, Stats};

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn uppercases_code() {
        assert_eq!(Code::new("eng").unwrap().to_string(), "ENG");
        assert_eq!(Code::new("Hr-Ops").unwrap().to_string(), "HR-OPS");

        assert!(Code::new("").is_none());
        assert!(Code::new("-ENG").is_none());
        assert!(Code::new("ENGINEERING1").is_none());
        assert!(Code::new("R&D").is_none());
    }

    #[test]
    fn rejects_negative_budget() {
        assert!(Budget::new(amount("0")).is_ok());
        assert_eq!(Budget::new(amount("-0.01")), Err(NegativeBudgetError));
        assert!(Budget::try_from(amount("-5")).is_err());
        assert_eq!(
            Amount::from(Budget::try_from(amount("1500.5")).unwrap()),
            amount("1500.5"),
        );
    }

    #[test]
    fn averages_paid_employees_only() {
        let stats =
            Stats::of(&[Some(amount("3000")), None, Some(amount("4000.50"))])
                .unwrap();

        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.total_salary_budget, amount("7000.50"));
        assert_eq!(stats.average_salary, amount("3500.25"));
    }

    #[test]
    fn empty_department_has_zero_stats() {
        assert_eq!(Stats::of(&[]), Some(Stats::default()));
    }
}
