//! [`Command`] for approving a [`Leave`].

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

/// [`Command`] for approving a [`Leave`].
///
/// Any previous decision on the [`Leave`] is overwritten.
#[derive(Clone, Debug)]
pub struct ApproveLeave {
    /// ID of the [`Leave`] to approve.
    pub id: leave::Id,

    /// [`leave::Approver`] approving the [`Leave`].
    pub approved_by: Option<leave::Approver>,
}

impl<Db> Command<ApproveLeave> for Service<Db>
where
    Db: Database<
            Select<By<Option<Leave>, leave::Id>>,
            Ok = Option<Leave>,
            Err = Traced<database::Error>,
        > + Database<Update<Leave>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Leave;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ApproveLeave) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApproveLeave { id, approved_by } = cmd;

        let mut leave = self
            .database()
            .execute(Select(By::<Option<Leave>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaveNotExists(id))
            .map_err(tracerr::wrap!())?;

        leave.approve(approved_by);
        leave.updated_at = DateTime::now().coerce();
        self.database()
            .execute(Update(leave.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(
            leave.id = %leave.id,
            employee.id = %leave.employee_id,
            approved_by = ?leave.approved_by.as_ref().map(ToString::to_string),
            "`Leave` approved",
        );

        Ok(leave)
    }
}

/// Error of [`ApproveLeave`] [`Command`] execution.
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
        command::{create_leave, fixture, Command as _},
        domain::leave,
        query::{leave as query, leaves},
        Query as _,
    };

    use super::{ApproveLeave, ExecutionError};

    #[tokio::test]
    async fn approves_leave() {
        let svc = fixture::service();
        let created = svc
            .execute(create_leave::spec::command("EMP-001"))
            .await
            .unwrap();

        let approved = svc
            .execute(ApproveLeave {
                id: created.id,
                approved_by: Some("mgr1".parse().unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(approved.status, leave::Status::Approved);
        assert_eq!(approved.approved_by.unwrap().to_string(), "mgr1");
        assert!(approved.updated_at >= created.updated_at);
        let stored = svc
            .execute(query::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, leave::Status::Approved);
    }

    #[tokio::test]
    async fn fails_on_unknown_leave() {
        let svc = fixture::service();

        let err = svc
            .execute(ApproveLeave {
                id: leave::Id::new(),
                approved_by: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::LeaveNotExists(_)));
    }

    #[tokio::test]
    async fn finds_leaves_by_approver() {
        let svc = fixture::service();
        let mut ids = vec![];
        for approver in ["mgr1", "mgr2"] {
            let created = svc
                .execute(create_leave::spec::command("EMP-001"))
                .await
                .unwrap();
            drop(
                svc.execute(ApproveLeave {
                    id: created.id,
                    approved_by: Some(approver.parse().unwrap()),
                })
                .await
                .unwrap(),
            );
            ids.push(created.id);
        }
        drop(
            svc.execute(create_leave::spec::command("EMP-002"))
                .await
                .unwrap(),
        );

        let found = svc
            .execute(leaves::ByApprover::by("mgr2".parse().unwrap()))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ids[1]);
    }
}
