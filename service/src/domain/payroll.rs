//! [`Payroll`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Amount, Date, DateTimeOf};
use derive_more::{Display, Error};

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::Employee;

/// Payroll record of an [`Employee`] for a single pay period.
#[derive(Clone, Debug)]
pub struct Payroll {
    /// ID of this [`Payroll`].
    pub id: Id,

    /// [`employee::Number`] of the [`Employee`] this [`Payroll`] is for.
    pub employee_id: employee::Number,

    /// Display [`EmployeeName`] of the [`Employee`].
    pub employee_name: Option<EmployeeName>,

    /// [`Period`] this [`Payroll`] covers.
    pub period: Period,

    /// [`Earnings`] of this [`Payroll`].
    pub earnings: Earnings,

    /// [`Deductions`] of this [`Payroll`].
    pub deductions: Deductions,

    /// [`Totals`] derived from [`Payroll::earnings`] and
    /// [`Payroll::deductions`].
    pub totals: Totals,

    /// [`Status`] of this [`Payroll`].
    pub status: Status,

    /// [`Date`] this [`Payroll`] is paid at.
    pub pay_date: Option<Date>,

    /// [`DateTime`] when this [`Payroll`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Payroll`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Payroll {
    /// Recalculates [`Payroll::totals`] from the current [`Earnings`] and
    /// [`Deductions`], discarding any previous values.
    ///
    /// # Errors
    ///
    /// If any of the [`Totals`] doesn't fit into an [`Amount`]. Previous
    /// [`Totals`] are kept intact in such case.
    pub fn recalculate(&mut self) -> Result<(), AmountOverflowError> {
        self.totals = Totals::of(&self.earnings, &self.deductions)?;
        Ok(())
    }
}

define_id! {
    #[doc = "ID of a [`Payroll`]."]
    Id
}

define_text! {
    #[doc = "Display name of an [`Employee`] in a [`Payroll`]."]
    EmployeeName(max = 512)
}

/// Pay period of a [`Payroll`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Period {
    /// First [`Date`] of this [`Period`].
    pub start: Option<Date>,

    /// Last [`Date`] of this [`Period`].
    pub end: Option<Date>,
}

/// Inclusive range of [`Payroll::pay_date`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PayDateRange {
    /// Earliest pay [`Date`] in this [`PayDateRange`].
    pub from: Date,

    /// Latest pay [`Date`] in this [`PayDateRange`].
    pub to: Date,
}

impl PayDateRange {
    /// Checks whether the provided [`Date`] falls into this [`PayDateRange`].
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Earnings constituting the gross pay of a [`Payroll`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Earnings {
    /// Basic salary for the period.
    pub basic_salary: Amount,

    /// Allowances paid on top of the salary.
    pub allowances: Amount,

    /// Overtime pay.
    pub overtime: Amount,

    /// Bonuses.
    pub bonuses: Amount,
}

impl Earnings {
    /// Sums up these [`Earnings`], returning [`None`] on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Amount> {
        Amount::checked_sum([
            self.basic_salary,
            self.allowances,
            self.overtime,
            self.bonuses,
        ])
    }
}

/// Deductions withheld from the gross pay of a [`Payroll`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Deductions {
    /// Withheld tax.
    pub tax: Amount,

    /// Health insurance contribution.
    pub health_insurance: Amount,

    /// Retirement fund contribution.
    pub retirement_fund: Amount,

    /// Any other deductions.
    pub other: Amount,
}

impl Deductions {
    /// Sums up these [`Deductions`], returning [`None`] on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Amount> {
        Amount::checked_sum([
            self.tax,
            self.health_insurance,
            self.retirement_fund,
            self.other,
        ])
    }
}

/// Derived totals of a [`Payroll`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Totals {
    /// Sum of all [`Earnings`].
    pub gross_pay: Amount,

    /// Sum of all [`Deductions`].
    pub total_deductions: Amount,

    /// Gross pay minus total deductions.
    pub net_pay: Amount,
}

impl Totals {
    /// Calculates [`Totals`] of the provided [`Earnings`] and [`Deductions`].
    ///
    /// # Errors
    ///
    /// If any of the [`Totals`] doesn't fit into an [`Amount`].
    pub fn of(
        earnings: &Earnings,
        deductions: &Deductions,
    ) -> Result<Self, AmountOverflowError> {
        let gross_pay = earnings.total().ok_or(AmountOverflowError)?;
        let total_deductions = deductions.total().ok_or(AmountOverflowError)?;
        let net_pay = gross_pay
            .checked_sub(total_deductions)
            .ok_or(AmountOverflowError)?;
        Ok(Self {
            gross_pay,
            total_deductions,
            net_pay,
        })
    }
}

/// Error of calculating [`Totals`] exceeding the range of an [`Amount`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("Payroll amounts are too large")]
pub struct AmountOverflowError;

define_kind! {
    #[doc = "Status of a [`Payroll`]."]
    enum Status {
        #[doc = "[`Payroll`] is being prepared."]
        Draft = 1,

        #[doc = "[`Payroll`] is processed and awaits payment."]
        Processed = 2,

        #[doc = "[`Payroll`] is paid out."]
        Paid = 3,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Draft
    }
}

/// [`DateTime`] when a [`Payroll`] was created.
pub type CreationDateTime = DateTimeOf<(Payroll, unit::Creation)>;

/// [`DateTime`] when a [`Payroll`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Payroll, unit::Modification)>;

#[cfg(test)]
mod spec {
    use common::Amount;

    use super::{
        AmountOverflowError, Deductions, Earnings, PayDateRange, Status, Totals,
    };

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn calculates_totals() {
        let earnings = Earnings {
            basic_salary: amount("5000"),
            allowances: amount("300.50"),
            overtime: amount("120"),
            bonuses: amount("0"),
        };
        let deductions = Deductions {
            tax: amount("900.10"),
            health_insurance: amount("150"),
            retirement_fund: amount("250"),
            other: amount("0.40"),
        };

        let totals = Totals::of(&earnings, &deductions).unwrap();

        assert_eq!(totals.gross_pay, amount("5420.50"));
        assert_eq!(totals.total_deductions, amount("1300.50"));
        assert_eq!(totals.net_pay, amount("4120"));
    }

    #[test]
    fn net_pay_may_go_negative() {
        let deductions = Deductions {
            tax: amount("10"),
            ..Deductions::default()
        };

        let totals = Totals::of(&Earnings::default(), &deductions).unwrap();

        assert_eq!(totals.net_pay, amount("-10"));
    }

    #[test]
    fn rejects_overflowing_totals() {
        let earnings = Earnings {
            basic_salary: amount("50000000000000000000000000000"),
            allowances: amount("50000000000000000000000000000"),
            ..Earnings::default()
        };
        assert_eq!(
            Totals::of(&earnings, &Deductions::default()),
            Err(AmountOverflowError),
        );

        let earnings = Earnings {
            basic_salary: amount("50000000000000000000000000000"),
            ..Earnings::default()
        };
        let deductions = Deductions {
            tax: amount("-50000000000000000000000000000"),
            ..Deductions::default()
        };
        assert_eq!(
            Totals::of(&earnings, &deductions),
            Err(AmountOverflowError),
        );
    }

    #[test]
    fn pay_date_range_is_inclusive() {
        let range = PayDateRange {
            from: "2024-06-01".parse().unwrap(),
            to: "2024-06-30".parse().unwrap(),
        };

        assert!(range.contains("2024-06-01".parse().unwrap()));
        assert!(range.contains("2024-06-30".parse().unwrap()));
        assert!(!range.contains("2024-07-01".parse().unwrap()));
        assert!(!range.contains("2024-05-31".parse().unwrap()));
    }

    #[test]
    fn defaults_to_draft() {
        assert_eq!(Status::default(), Status::Draft);
        assert_eq!(Status::Processed.to_string(), "PROCESSED");
    }
}
