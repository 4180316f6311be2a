//! [`JobPosting`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        department,
        job_posting::{self, SalaryRange},
        JobPosting,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `job_postings` table selected into a [`JobPosting`].
const COLUMNS: &str = "\
    id, title, department, location, employment_type, \
    description, requirements, skills, experience_level, \
    salary_min, salary_max, benefits, \
    status, application_deadline, posted_by, \
    created_at, updated_at";

/// Reads a [`JobPosting`] from the provided [`Row`].
fn from_row(row: &Row) -> JobPosting {
    JobPosting {
        id: row.get("id"),
        title: row.get("title"),
        department: row.get("department"),
        location: row.get("location"),
        employment_type: row.get("employment_type"),
        description: row.get("description"),
        requirements: row.get("requirements"),
        skills: row.get("skills"),
        experience_level: row.get("experience_level"),
        salary: SalaryRange {
            min: row.get("salary_min"),
            max: row.get("salary_max"),
        },
        benefits: row.get("benefits"),
        status: row.get("status"),
        application_deadline: row.get("application_deadline"),
        posted_by: row.get("posted_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<JobPosting>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobPosting>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<JobPosting>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM job_postings ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<JobPosting>, job_posting::Status>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobPosting>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<JobPosting>, job_posting::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM job_postings \
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

impl<C> Database<Select<By<Vec<JobPosting>, department::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobPosting>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<JobPosting>, department::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let department = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM job_postings \
             WHERE department = $1::VARCHAR \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&department])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<JobPosting>, job_posting::EmploymentType>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobPosting>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<JobPosting>, job_posting::EmploymentType>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employment_type = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM job_postings \
             WHERE employment_type = $1::INT2 \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&employment_type])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<JobPosting>, job_posting::Poster>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<JobPosting>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<JobPosting>, job_posting::Poster>>,
    ) -> Result<Self::Ok, Self::Err> {
        let poster = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM job_postings \
             WHERE posted_by = $1::VARCHAR \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&poster])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<JobPosting>, job_posting::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<JobPosting>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<JobPosting>, job_posting::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM job_postings WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<JobPosting>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<JobPosting>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(posting): Insert<JobPosting>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(posting))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<JobPosting>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(posting): Update<JobPosting>,
    ) -> Result<Self::Ok, Self::Err> {
        let JobPosting {
            id,
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            skills,
            experience_level,
            salary,
            benefits,
            status,
            application_deadline,
            posted_by,
            created_at,
            updated_at,
        } = posting;

        const SQL: &str = "\
            INSERT INTO job_postings (\
                id, title, department, location, employment_type, \
                description, requirements, skills, experience_level, \
                salary_min, salary_max, benefits, \
                status, application_deadline, posted_by, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, $5::INT2, \
                $6::TEXT, $7::TEXT, $8::TEXT[], $9::INT2, \
                $10::NUMERIC, $11::NUMERIC, $12::TEXT, \
                $13::INT2, $14::DATE, $15::VARCHAR, \
                $16::TIMESTAMPTZ, $17::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                department = EXCLUDED.department, \
                location = EXCLUDED.location, \
                employment_type = EXCLUDED.employment_type, \
                description = EXCLUDED.description, \
                requirements = EXCLUDED.requirements, \
                skills = EXCLUDED.skills, \
                experience_level = EXCLUDED.experience_level, \
                salary_min = EXCLUDED.salary_min, \
                salary_max = EXCLUDED.salary_max, \
                benefits = EXCLUDED.benefits, \
                status = EXCLUDED.status, \
                application_deadline = EXCLUDED.application_deadline, \
                posted_by = EXCLUDED.posted_by, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &department,
                &location,
                &employment_type,
                &description,
                &requirements,
                &skills,
                &experience_level,
                &salary.min,
                &salary.max,
                &benefits,
                &status,
                &application_deadline,
                &posted_by,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<JobPosting, job_posting::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<JobPosting, job_posting::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM job_postings WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
