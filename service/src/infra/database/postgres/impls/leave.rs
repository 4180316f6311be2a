//! [`Leave`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{employee, leave, Leave},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `leaves` table selected into a [`Leave`].
const COLUMNS: &str = "\
    id, employee_id, leave_type, \
    start_date, end_date, total_days, half_day, \
    reason, status, approved_by, comments, \
    created_at, updated_at";

/// Reads a [`Leave`] from the provided [`Row`].
fn from_row(row: &Row) -> Leave {
    Leave {
        id: row.get("id"),
        employee_id: row.get("employee_id"),
        kind: row.get("leave_type"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        total_days: row.get("total_days"),
        half_day: row.get("half_day"),
        reason: row.get("reason"),
        status: row.get("status"),
        approved_by: row.get("approved_by"),
        comments: row.get("comments"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<Leave>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Leave>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Leave>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM leaves ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Leave>, employee::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Leave>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Leave>, employee::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM leaves \
             WHERE employee_id = $1::VARCHAR \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&employee_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Leave>, leave::Status>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Leave>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Leave>, leave::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM leaves \
             WHERE status = $1::INT2 \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&status])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Leave>, leave::Kind>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Leave>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Leave>, leave::Kind>>,
    ) -> Result<Self::Ok, Self::Err> {
        let kind = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM leaves \
             WHERE leave_type = $1::INT2 \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&kind])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Leave>, leave::Approver>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Leave>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Leave>, leave::Approver>>,
    ) -> Result<Self::Ok, Self::Err> {
        let approver = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM leaves \
             WHERE approved_by = $1::VARCHAR \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&approver])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Leave>, leave::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Leave>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Leave>, leave::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM leaves WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Leave>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Leave>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(leave): Insert<Leave>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(leave)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Leave>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(leave): Update<Leave>,
    ) -> Result<Self::Ok, Self::Err> {
        let Leave {
            id,
            employee_id,
            kind,
            start_date,
            end_date,
            total_days,
            half_day,
            reason,
            status,
            approved_by,
            comments,
            created_at,
            updated_at,
        } = leave;

        const SQL: &str = "\
            INSERT INTO leaves (\
                id, employee_id, leave_type, \
                start_date, end_date, total_days, half_day, \
                reason, status, approved_by, comments, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::INT2, \
                $4::DATE, $5::DATE, $6::NUMERIC, $7::BOOLEAN, \
                $8::TEXT, $9::INT2, $10::VARCHAR, $11::TEXT, \
                $12::TIMESTAMPTZ, $13::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET employee_id = EXCLUDED.employee_id, \
                leave_type = EXCLUDED.leave_type, \
                start_date = EXCLUDED.start_date, \
                end_date = EXCLUDED.end_date, \
                total_days = EXCLUDED.total_days, \
                half_day = EXCLUDED.half_day, \
                reason = EXCLUDED.reason, \
                status = EXCLUDED.status, \
                approved_by = EXCLUDED.approved_by, \
                comments = EXCLUDED.comments, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &kind,
                &start_date,
                &end_date,
                &total_days,
                &half_day,
                &reason,
                &status,
                &approved_by,
                &comments,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Leave, leave::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Leave, leave::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM leaves WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
