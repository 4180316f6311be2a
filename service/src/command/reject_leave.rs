//! [`Command`] for rejecting a [`Leave`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{leave, Leave},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for rejecting a [`Leave`].
///
/// Any previous decision and comments on the [`Leave`] are overwritten.
#[derive(Clone, Debug)]
pub struct RejectLeave {
    /// ID of the [`Leave`] to reject.
    pub id: leave::Id,

    /// [`leave::Approver`] rejecting the [`Leave`].
    pub rejected_by: Option<leave::Approver>,

    /// Comments explaining the rejection.
    pub comments: Option<String>,
}

impl<Db> Command<RejectLeave> for Service<Db>
where
    Db: Database<
            Select<By<Option<Leave>, leave::Id>>,
            Ok = Option<Leave>,
            Err = Traced<database::Error>,
        > + Database<Update<Leave>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Leave;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RejectLeave) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RejectLeave {
            id,
            rejected_by,
            comments,
        } = cmd;

        let mut leave = self
            .database()
            .execute(Select(By::<Option<Leave>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaveNotExists(id))
            .map_err(tracerr::wrap!())?;

        leave.reject(rejected_by, comments);
        leave.updated_at = DateTime::now().coerce();
        self.database()
            .execute(Update(leave.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(
            leave.id = %leave.id,
            employee.id = %leave.employee_id,
            rejected_by = ?leave.approved_by.as_ref().map(ToString::to_string),
            "`Leave` rejected",
        );

        Ok(leave)
    }
}

/// Error of [`RejectLeave`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

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

    use super::{ExecutionError, RejectLeave};

    #[tokio::test]
    async fn overwrites_previous_approval() {
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

        let rejected = svc
            .execute(RejectLeave {
                id: created.id,
                rejected_by: Some("mgr2".parse().unwrap()),
                comments: Some("Team is short-staffed".into()),
            })
            .await
            .unwrap();

        assert_eq!(rejected.status, leave::Status::Rejected);
        assert_eq!(rejected.approved_by.unwrap().to_string(), "mgr2");
        assert_eq!(rejected.comments.as_deref(), Some("Team is short-staffed"));
    }

    #[tokio::test]
    async fn fails_on_unknown_leave() {
        let svc = fixture::service();

        let err = svc
            .execute(RejectLeave {
                id: leave::Id::new(),
                rejected_by: None,
                comments: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::LeaveNotExists(_)));
    }
}
