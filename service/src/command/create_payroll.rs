//! [`Command`] for creating a new [`Payroll`].

use common::{operations::Insert, Date, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{employee, payroll, Payroll},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Payroll`].
///
/// [`payroll::Totals`] are always calculated from the provided
/// [`payroll::Earnings`] and [`payroll::Deductions`].
///
/// Also describes the full state of a [`Payroll`] for the [`UpdatePayroll`]
/// [`Command`].
///
/// [`UpdatePayroll`]: super::UpdatePayroll
#[derive(Clone, Debug)]
pub struct CreatePayroll {
    /// [`employee::Number`] of the paid [`Employee`].
    ///
    /// [`Employee`]: crate::domain::Employee
    pub employee_id: employee::Number,

    /// [`payroll::EmployeeName`] of the paid [`Employee`].
    ///
    /// [`Employee`]: crate::domain::Employee
    pub employee_name: Option<payroll::EmployeeName>,

    /// [`payroll::Period`] of a new [`Payroll`].
    pub period: payroll::Period,

    /// [`payroll::Earnings`] of a new [`Payroll`].
    pub earnings: payroll::Earnings,

    /// [`payroll::Deductions`] of a new [`Payroll`].
    pub deductions: payroll::Deductions,

    /// [`payroll::Status`] of a new [`Payroll`].
    pub status: payroll::Status,

    /// Pay [`Date`] of a new [`Payroll`].
    pub pay_date: Option<Date>,
}

impl CreatePayroll {
    /// Builds a [`Payroll`] with the provided [`payroll::Id`] and
    /// [`DateTime`]s out of this [`CreatePayroll`], calculating its
    /// [`payroll::Totals`].
    pub(crate) fn into_payroll(
        self,
        id: payroll::Id,
        created_at: payroll::CreationDateTime,
        updated_at: payroll::UpdateDateTime,
    ) -> Result<Payroll, payroll::AmountOverflowError> {
        let Self {
            employee_id,
            employee_name,
            period,
            earnings,
            deductions,
            status,
            pay_date,
        } = self;

        let mut payroll = Payroll {
            id,
            employee_id,
            employee_name,
            period,
            earnings,
            deductions,
            totals: payroll::Totals::default(),
            status,
            pay_date,
            created_at,
            updated_at,
        };
        payroll.recalculate()?;
        Ok(payroll)
    }
}

impl<Db> Command<CreatePayroll> for Service<Db>
where
    Db: Database<Insert<Payroll>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Payroll;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreatePayroll) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let now = DateTime::now();
        let payroll = cmd
            .into_payroll(payroll::Id::new(), now.coerce(), now.coerce())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Insert(payroll.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(payroll)
    }
}

/// Error of [`CreatePayroll`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`payroll::Totals`] don't fit into an [`Amount`].
    ///
    /// [`Amount`]: common::Amount
    #[display("Cannot calculate `Payroll` totals: {_0}")]
    AmountOverflow(payroll::AmountOverflowError),
}

#[cfg(test)]
pub(crate) mod spec {
    use common::Amount;

    use crate::{
        command::{fixture, Command as _},
        domain::payroll,
        query::payrolls,
        Query as _,
    };

    use super::{CreatePayroll, ExecutionError};

    pub(crate) fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    /// Returns a valid [`CreatePayroll`] [`Command`] for the provided
    /// employee number.
    pub(crate) fn command(employee_id: &str) -> CreatePayroll {
        CreatePayroll {
            employee_id: employee_id.parse().unwrap(),
            employee_name: Some("Jane Doe".parse().unwrap()),
            period: payroll::Period {
                start: Some("2024-06-01".parse().unwrap()),
                end: Some("2024-06-30".parse().unwrap()),
            },
            earnings: payroll::Earnings {
                basic_salary: amount("5000"),
                allowances: amount("500"),
                overtime: amount("250.75"),
                bonuses: amount("1000"),
            },
            deductions: payroll::Deductions {
                tax: amount("1200"),
                health_insurance: amount("300"),
                retirement_fund: amount("400.25"),
                other: amount("50"),
            },
            status: payroll::Status::default(),
            pay_date: None,
        }
    }

    #[tokio::test]
    async fn calculates_totals_and_defaults_to_draft() {
        let svc = fixture::service();

        let created = svc.execute(command("EMP-001")).await.unwrap();

        assert_eq!(created.status, payroll::Status::Draft);
        assert_eq!(created.totals.gross_pay, amount("6750.75"));
        assert_eq!(created.totals.total_deductions, amount("1950.25"));
        assert_eq!(created.totals.net_pay, amount("4800.50"));
    }

    #[tokio::test]
    async fn finds_by_exact_period() {
        let svc = fixture::service();
        let june = svc.execute(command("EMP-001")).await.unwrap();
        let mut july = command("EMP-001");
        july.period = payroll::Period {
            start: Some("2024-07-01".parse().unwrap()),
            end: Some("2024-07-31".parse().unwrap()),
        };
        drop(svc.execute(july).await.unwrap());

        let found = svc
            .execute(payrolls::ByPeriod::by(june.period))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, june.id);
    }

    #[tokio::test]
    async fn rejects_overflowing_amounts() {
        let svc = fixture::service();
        let mut cmd = command("EMP-001");
        cmd.earnings.basic_salary = amount("50000000000000000000000000000");
        cmd.earnings.allowances = amount("50000000000000000000000000000");

        let err = svc.execute(cmd).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::AmountOverflow(_)));
        let stored = svc.execute(payrolls::All::by(())).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn finds_by_pay_date_inclusively() {
        let svc = fixture::service();
        let mut ids = vec![];
        for pay_date in ["2024-06-30", "2024-07-15", "2024-07-31", "2024-08-01"]
        {
            let mut cmd = command("EMP-001");
            cmd.pay_date = Some(pay_date.parse().unwrap());
            ids.push(svc.execute(cmd).await.unwrap().id);
        }
        drop(svc.execute(command("EMP-002")).await.unwrap());

        let found = svc
            .execute(payrolls::ByPayDate::by(payroll::PayDateRange {
                from: "2024-07-01".parse().unwrap(),
                to: "2024-07-31".parse().unwrap(),
            }))
            .await
            .unwrap();

        let found = found.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(found, [ids[1], ids[2]]);
    }
}
