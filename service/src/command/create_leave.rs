//! [`Command`] for requesting a new [`Leave`].

use common::{operations::Insert, Date, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{employee, leave, Leave},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for requesting a new [`Leave`].
///
/// Also describes the editable state of a [`Leave`] for the [`UpdateLeave`]
/// [`Command`].
///
/// [`UpdateLeave`]: super::UpdateLeave
#[derive(Clone, Debug)]
pub struct CreateLeave {
    /// [`employee::Number`] of the requesting [`Employee`].
    ///
    /// [`Employee`]: crate::domain::Employee
    pub employee_id: employee::Number,

    /// [`leave::Kind`] of a new [`Leave`].
    pub kind: leave::Kind,

    /// Start [`Date`] of a new [`Leave`].
    pub start_date: Option<Date>,

    /// End [`Date`] of a new [`Leave`].
    pub end_date: Option<Date>,

    /// Indicator whether a new [`Leave`] takes a half of a day.
    pub half_day: bool,

    /// Reason of a new [`Leave`].
    pub reason: Option<String>,

    /// Comments on a new [`Leave`].
    pub comments: Option<String>,
}

impl CreateLeave {
    /// Counts [`leave::Days`] of this [`CreateLeave`], if both its [`Date`]s
    /// are known.
    ///
    /// # Errors
    ///
    /// If the period ends before it starts.
    pub(crate) fn total_days(
        &self,
    ) -> Result<Option<leave::Days>, leave::InvertedPeriodError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                leave::Days::count(start, end, self.half_day).map(Some)
            }
            (_, None) | (None, _) => Ok(None),
        }
    }
}

impl<Db> Command<CreateLeave> for Service<Db>
where
    Db: Database<Insert<Leave>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Leave;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateLeave) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let total_days = cmd
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
        } = cmd;

        let now = DateTime::now();
        let leave = Leave {
            id: leave::Id::new(),
            employee_id,
            kind,
            start_date,
            end_date,
            total_days,
            half_day,
            reason,
            status: leave::Status::Pending,
            approved_by: None,
            comments,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(leave.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(leave)
    }
}

/// Error of [`CreateLeave`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Leave`] period ends before it starts.
    #[display("Invalid `Leave` period: {_0}")]
    InvalidPeriod(leave::InvertedPeriodError),
}

#[cfg(test)]
pub(crate) mod spec {
    use crate::{
        command::{fixture, Command as _},
        domain::leave,
        query::leaves,
        Query as _,
    };

    use super::{CreateLeave, ExecutionError};

    /// Returns a valid [`CreateLeave`] [`Command`] for the provided
    /// employee number.
    pub(crate) fn command(employee_id: &str) -> CreateLeave {
        CreateLeave {
            employee_id: employee_id.parse().unwrap(),
            kind: leave::Kind::Annual,
            start_date: Some("2024-07-01".parse().unwrap()),
            end_date: Some("2024-07-05".parse().unwrap()),
            half_day: false,
            reason: Some("Vacation".into()),
            comments: None,
        }
    }

    #[tokio::test]
    async fn creates_pending_leave_with_total_days() {
        let svc = fixture::service();

        let created = svc.execute(command("EMP-001")).await.unwrap();

        assert_eq!(created.status, leave::Status::Pending);
        assert!(created.approved_by.is_none());
        assert_eq!(created.total_days.unwrap().to_string(), "5");
        let pending = svc
            .execute(leaves::ByStatus::by(leave::Status::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn leaves_total_days_empty_without_dates() {
        let svc = fixture::service();
        let mut cmd = command("EMP-001");
        cmd.end_date = None;

        let created = svc.execute(cmd).await.unwrap();

        assert!(created.total_days.is_none());
    }

    #[tokio::test]
    async fn rejects_inverted_period() {
        let svc = fixture::service();
        let mut cmd = command("EMP-001");
        cmd.start_date = Some("2024-07-10".parse().unwrap());

        let err = svc.execute(cmd).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::InvalidPeriod(_)));
        let all = svc.execute(leaves::All::by(())).await.unwrap();
        assert!(all.is_empty());
    }
}
