//! [`Performance`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{employee, performance, Performance},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `performances` table selected into a [`Performance`].
const COLUMNS: &str =
    "id, employee_id, review_period, performance_rating, comments";

/// Reads a [`Performance`] from the provided [`Row`].
fn from_row(row: &Row) -> Performance {
    Performance {
        id: row.get("id"),
        employee_id: row.get("employee_id"),
        review_period: row.get("review_period"),
        rating: row.get("performance_rating"),
        comments: row.get("comments"),
    }
}

impl<C> Database<Select<By<Vec<Performance>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Performance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Performance>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM performances ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Performance>, employee::Number>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Performance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Performance>, employee::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM performances \
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

impl<C> Database<Select<By<Option<Performance>, performance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Performance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Performance>, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM performances WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<read::Exists<Performance>, performance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::Exists<Performance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::Exists<Performance>, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS (\
                SELECT 1 FROM performances WHERE id = $1::UUID\
            ) AS exists";
        let exists: bool = self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .is_some_and(|row| row.get("exists"));
        Ok(exists.into())
    }
}

impl<C> Database<Insert<Performance>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Performance>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(review): Insert<Performance>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(review)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Performance>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(review): Update<Performance>,
    ) -> Result<Self::Ok, Self::Err> {
        let Performance {
            id,
            employee_id,
            review_period,
            rating,
            comments,
        } = review;

        const SQL: &str = "\
            INSERT INTO performances (\
                id, employee_id, review_period, performance_rating, comments\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, $5::TEXT\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET employee_id = EXCLUDED.employee_id, \
                review_period = EXCLUDED.review_period, \
                performance_rating = EXCLUDED.performance_rating, \
                comments = EXCLUDED.comments";
        self.exec(
            SQL,
            &[&id, &employee_id, &review_period, &rating, &comments],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Performance, performance::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Performance, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM performances WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
