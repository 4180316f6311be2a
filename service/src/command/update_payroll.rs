//! [`Command`] for updating an existing [`Payroll`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{payroll, Payroll},
    infra::{database, Database},
    Service,
};

use super::{Command, CreatePayroll};

/// [`Command`] for updating an existing [`Payroll`].
///
/// Replaces all the editable fields and recalculates [`payroll::Totals`],
/// keeping the creation time.
#[derive(Clone, Debug)]
pub struct UpdatePayroll {
    /// ID of the [`Payroll`] to update.
    pub id: payroll::Id,

    /// New state of the [`Payroll`].
    pub payroll: CreatePayroll,
}

impl<Db> Command<UpdatePayroll> for Service<Db>
where
    Db: Database<
            Select<By<Option<Payroll>, payroll::Id>>,
            Ok = Option<Payroll>,
            Err = Traced<database::Error>,
        > + Database<Update<Payroll>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Payroll;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdatePayroll) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePayroll { id, payroll } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Payroll>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PayrollNotExists(id))
            .map_err(tracerr::wrap!())?;

        let payroll = payroll
            .into_payroll(id, existing.created_at, DateTime::now().coerce())
            .map_err(tracerr::from_and_wrap!(=> E))?;
        self.database()
            .execute(Update(payroll.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(payroll)
    }
}

/// Error of [`UpdatePayroll`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Payroll`] doesn't exist.
    #[display("`Payroll(id: {_0})` does not exist")]
    #[from(ignore)]
    PayrollNotExists(#[error(not(source))] payroll::Id),

    /// [`payroll::Totals`] don't fit into an [`Amount`].
    ///
    /// [`Amount`]: common::Amount
    #[display("Cannot calculate `Payroll` totals: {_0}")]
    AmountOverflow(payroll::AmountOverflowError),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            create_payroll::{self, spec::amount},
            fixture, Command as _,
        },
        domain::payroll,
        query::payroll as query,
        Query as _,
    };

    use super::{ExecutionError, UpdatePayroll};

    #[tokio::test]
    async fn recalculates_totals() {
        let svc = fixture::service();
        let created = svc
            .execute(create_payroll::spec::command("EMP-001"))
            .await
            .unwrap();

        let mut changes = create_payroll::spec::command("EMP-001");
        changes.earnings.bonuses = amount("0");
        changes.deductions.other = amount("0");
        changes.status = payroll::Status::Processed;
        let updated = svc
            .execute(UpdatePayroll {
                id: created.id,
                payroll: changes,
            })
            .await
            .unwrap();

        assert_eq!(updated.totals.gross_pay, amount("5750.75"));
        assert_eq!(updated.totals.total_deductions, amount("1900.25"));
        assert_eq!(updated.totals.net_pay, amount("3850.50"));
        assert_eq!(updated.created_at, created.created_at);
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, payroll::Status::Processed);
        assert_eq!(stored.totals, updated.totals);
    }

    #[tokio::test]
    async fn fails_on_unknown_payroll() {
        let svc = fixture::service();

        let err = svc
            .execute(UpdatePayroll {
                id: payroll::Id::new(),
                payroll: create_payroll::spec::command("EMP-001"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PayrollNotExists(_)));
    }

    #[tokio::test]
    async fn keeps_stored_payroll_on_overflow() {
        let svc = fixture::service();
        let created = svc
            .execute(create_payroll::spec::command("EMP-001"))
            .await
            .unwrap();

        let mut changes = create_payroll::spec::command("EMP-001");
        changes.earnings.basic_salary =
            amount("50000000000000000000000000000");
        changes.earnings.allowances = amount("50000000000000000000000000000");
        let err = svc
            .execute(UpdatePayroll {
                id: created.id,
                payroll: changes,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::AmountOverflow(_)));
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.totals, created.totals);
    }
}
