//! [`Attendance`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Date,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        attendance::{self, Punch},
        employee, Attendance,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `attendances` table selected into an [`Attendance`].
const COLUMNS: &str = "\
    id, employee_id, date, \
    check_in_time, check_in_location, \
    check_out_time, check_out_location, \
    working_hours, overtime_hours, status, notes, is_manual_entry, \
    created_at, updated_at";

/// Reads a [`Punch`] stored in the provided columns of the [`Row`].
fn punch_from_row(row: &Row, time: &str, location: &str) -> Option<Punch> {
    row.get::<_, Option<attendance::PunchDateTime>>(time)
        .map(|at| Punch {
            at,
            location: row
                .get::<_, Option<attendance::WorkLocation>>(location)
                .unwrap_or_default(),
        })
}

/// Reads an [`Attendance`] from the provided [`Row`].
fn from_row(row: &Row) -> Attendance {
    Attendance {
        id: row.get("id"),
        employee_id: row.get("employee_id"),
        date: row.get("date"),
        check_in: punch_from_row(row, "check_in_time", "check_in_location"),
        check_out: punch_from_row(row, "check_out_time", "check_out_location"),
        working_hours: row.get("working_hours"),
        overtime_hours: row.get("overtime_hours"),
        status: row.get("status"),
        notes: row.get("notes"),
        is_manual_entry: row.get("is_manual_entry"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<Attendance>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attendance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Attendance>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM attendances ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Attendance>, employee::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attendance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attendance>, employee::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM attendances \
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

impl<C> Database<Select<By<Vec<Attendance>, Date>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attendance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attendance>, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        let date = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM attendances \
             WHERE date = $1::DATE \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&date])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Attendance>, attendance::Status>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attendance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attendance>, attendance::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM attendances \
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

impl<C> Database<Select<By<Option<Attendance>, attendance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Attendance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Attendance>, attendance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM attendances WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Attendance>, attendance::Day>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Attendance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Attendance>, attendance::Day>>,
    ) -> Result<Self::Ok, Self::Err> {
        let attendance::Day { employee_id, date } = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM attendances \
             WHERE employee_id = $1::VARCHAR \
               AND date = $2::DATE",
        );
        Ok(self
            .query_opt(sql.as_str(), &[&employee_id, &date])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Attendance>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Attendance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(attendance): Insert<Attendance>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(attendance))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Attendance>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(attendance): Update<Attendance>,
    ) -> Result<Self::Ok, Self::Err> {
        let Attendance {
            id,
            employee_id,
            date,
            check_in,
            check_out,
            working_hours,
            overtime_hours,
            status,
            notes,
            is_manual_entry,
            created_at,
            updated_at,
        } = attendance;
        let (check_in_time, check_in_location) =
            (check_in.map(|p| p.at), check_in.map(|p| p.location));
        let (check_out_time, check_out_location) =
            (check_out.map(|p| p.at), check_out.map(|p| p.location));

        const SQL: &str = "\
            INSERT INTO attendances (\
                id, employee_id, date, \
                check_in_time, check_in_location, \
                check_out_time, check_out_location, \
                working_hours, overtime_hours, \
                status, notes, is_manual_entry, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::DATE, \
                $4::TIMESTAMPTZ, $5::INT2, \
                $6::TIMESTAMPTZ, $7::INT2, \
                $8::NUMERIC, $9::NUMERIC, \
                $10::INT2, $11::TEXT, $12::BOOLEAN, \
                $13::TIMESTAMPTZ, $14::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET employee_id = EXCLUDED.employee_id, \
                date = EXCLUDED.date, \
                check_in_time = EXCLUDED.check_in_time, \
                check_in_location = EXCLUDED.check_in_location, \
                check_out_time = EXCLUDED.check_out_time, \
                check_out_location = EXCLUDED.check_out_location, \
                working_hours = EXCLUDED.working_hours, \
                overtime_hours = EXCLUDED.overtime_hours, \
                status = EXCLUDED.status, \
                notes = EXCLUDED.notes, \
                is_manual_entry = EXCLUDED.is_manual_entry, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &date,
                &check_in_time,
                &check_in_location,
                &check_out_time,
                &check_out_location,
                &working_hours,
                &overtime_hours,
                &status,
                &notes,
                &is_manual_entry,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Attendance, attendance::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Attendance, attendance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM attendances WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
