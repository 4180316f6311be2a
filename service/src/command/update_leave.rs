//! [`Command`] for updating an existing [`Leave`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{leave, Leave},
    infra::{database, Database},
    Service,
};

use super::{Command, CreateLeave};

/// [`Command`] for updating an existing [`Leave`].
///
/// Replaces the editable fields only: the [`leave::Status`], the approver
/// and the creation time are kept as stored.
#[derive(Clone, Debug)]
pub struct UpdateLeave {
    /// ID of the [`Leave`] to update.
    pub id: leave::Id,

    /// New editable state of the [`Leave`].
    pub leave: CreateLeave,
}

impl<Db> Command<UpdateLeave> for Service<Db>
where
    Db: Database<
            Select<By<Option<Leave>, leave::Id>>,
            Ok = Option<Leave>,
            Err = Traced<database::Error>,
        > + Database<Update<Leave>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Leave;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateLeave) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateLeave { id, leave: changes } = cmd;

        let mut leave = self
            .database()
            .execute(Select(By::<Option<Leave>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaveNotExists(id))
            .map_err(tracerr::wrap!())?;

        let total_days = changes
            .total_days()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let CreateLeave {
            employee_id,
            kind,
            start_date,
            end_date,
            half_day,
            reason,
            comments,
        } = changes;
        leave.employee_id = employee_id;
        leave.kind = kind;
        leave.start_date = start_date;
        leave.end_date = end_date;
        leave.total_days = total_days;
        leave.half_day = half_day;
        leave.reason = reason;
        leave.comments = comments;
        leave.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(leave.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(leave)
    }
}

/// Error of [`UpdateLeave`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Leave`] period ends before it starts.
    #[display("Invalid `Leave` period: {_0}")]
    InvalidPeriod(leave::InvertedPeriodError),

    /// [`Leave`] doesn't exist.
    #[display("`Leave(id: {_0})` does not exist")]
    #[from(ignore)]
    LeaveNotExists(#[error(not(source))] leave::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_leave, fixture, ApproveLeave, Command as _},
        domain::leave,
    };

    use super::{ExecutionError, UpdateLeave};

    #[tokio::test]
    async fn keeps_decision_and_recounts_days() {
        let svc = fixture::service();
        let created = svc
            .execute(create_leave::spec::command("EMP-001"))
            .await
            .unwrap();
        drop(
            svc.execute(ApproveLeave {
                id: created.id,
                approved_by: Some("mgr1".parse().unwrap()),
            })
            .await
            .unwrap(),
        );

        let mut changes = create_leave::spec::command("EMP-001");
        changes.end_date = Some("2024-07-02".parse().unwrap());
        changes.kind = leave::Kind::Personal;
        let updated = svc
            .execute(UpdateLeave {
                id: created.id,
                leave: changes,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, leave::Status::Approved);
        assert_eq!(updated.approved_by.unwrap().to_string(), "mgr1");
        assert_eq!(updated.kind, leave::Kind::Personal);
        assert_eq!(updated.total_days.unwrap().to_string(), "2");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn fails_on_unknown_leave() {
        let svc = fixture::service();

        let err = svc
            .execute(UpdateLeave {
                id: leave::Id::new(),
                leave: create_leave::spec::command("EMP-001"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::LeaveNotExists(_)));
    }

    #[tokio::test]
    async fn reports_unknown_leave_before_invalid_period() {
        let svc = fixture::service();
        let mut changes = create_leave::spec::command("EMP-001");
        changes.start_date = Some("2024-07-05".parse().unwrap());
        changes.end_date = Some("2024-07-01".parse().unwrap());

        let err = svc
            .execute(UpdateLeave {
                id: leave::Id::new(),
                leave: changes,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::LeaveNotExists(_)));
    }

    #[tokio::test]
    async fn rejects_inverted_period_of_existing_leave() {
        let svc = fixture::service();
        let created = svc
            .execute(create_leave::spec::command("EMP-001"))
            .await
            .unwrap();
        let mut changes = create_leave::spec::command("EMP-001");
        changes.start_date = Some("2024-07-05".parse().unwrap());
        changes.end_date = Some("2024-07-01".parse().unwrap());

        let err = svc
            .execute(UpdateLeave {
                id: created.id,
                leave: changes,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::InvalidPeriod(_)));
    }
}
