//! [`JobApplication`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{job_application, job_posting, JobApplication},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `job_applications` table selected into a
/// [`JobApplication`].
const COLUMNS: &str = "\
    id, job_posting_id, user_id, \
    applicant_name, email, cover_letter, status, \
    created_at, updated_at";

/// Reads a [`JobApplication`] from the provided [`Row`].
fn from_row(row: &Row) -> JobApplication {
    JobApplication {
        id: row.get("id"),
        job_posting_id: row.get("job_posting_id"),
        user_id: row.get("user_id"),
        applicant_name: row.get("applicant_name"),
        email: row.get("email"),
        cover_letter: row.get("cover_letter"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<JobApplication>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobApplication>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<JobApplication>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM job_applications ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<JobApplication>, job_posting::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobApplication>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<JobApplication>, job_posting::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let job_posting_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM job_applications \
             WHERE job_posting_id = $1::UUID \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&job_posting_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<JobApplication>, job_application::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<JobApplication>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<JobApplication>, job_application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM job_applications WHERE id = $1::UUID",
        );
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<JobApplication>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<JobApplication>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(application): Insert<JobApplication>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(application))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<JobApplication>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(application): Update<JobApplication>,
    ) -> Result<Self::Ok, Self::Err> {
        let JobApplication {
            id,
            job_posting_id,
            user_id,
            applicant_name,
            email,
            cover_letter,
            status,
            created_at,
            updated_at,
        } = application;

        const SQL: &str = "\
            INSERT INTO job_applications (\
                id, job_posting_id, user_id, \
                applicant_name, email, cover_letter, status, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::VARCHAR, $5::VARCHAR, $6::TEXT, $7::INT2, \
                $8::TIMESTAMPTZ, $9::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET job_posting_id = EXCLUDED.job_posting_id, \
                user_id = EXCLUDED.user_id, \
                applicant_name = EXCLUDED.applicant_name, \
                email = EXCLUDED.email, \
                cover_letter = EXCLUDED.cover_letter, \
                status = EXCLUDED.status, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &job_posting_id,
                &user_id,
                &applicant_name,
                &email,
                &cover_letter,
                &status,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<JobApplication, job_application::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<JobApplication, job_application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM job_applications WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
