//! [`Department`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{department, Department},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `departments` table selected into a [`Department`].
const COLUMNS: &str = "\
    id, name, code, description, manager, budget, location, \
    parent_id, is_active, established_date, \
    created_at, updated_at";

/// Reads a [`Department`] from the provided [`Row`].
fn from_row(row: &Row) -> Department {
    Department {
        id: row.get("id"),
        name: row.get("name"),
        code: row.get("code"),
        description: row.get("description"),
        manager: row.get("manager"),
        budget: row.get("budget"),
        location: row.get("location"),
        parent: row.get("parent_id"),
        is_active: row.get("is_active"),
        established_date: row.get("established_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<Department>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Department>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Department>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM departments ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Department>, department::Active>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Department>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Department>, department::Active>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} FROM departments \
             WHERE is_active \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Department>, department::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Department>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Department>, department::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM departments WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Department>, department::Code>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Department>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Department>, department::Code>>,
    ) -> Result<Self::Ok, Self::Err> {
        let code = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM departments WHERE code = $1::VARCHAR",
        );
        Ok(self
            .query_opt(sql.as_str(), &[&code])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Department>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Department>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(department): Insert<Department>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(department))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Department>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(department): Update<Department>,
    ) -> Result<Self::Ok, Self::Err> {
        let Department {
            id,
            name,
            code,
            description,
            manager,
            budget,
            location,
            parent,
            is_active,
            established_date,
            created_at,
            updated_at,
        } = department;

        const SQL: &str = "\
            INSERT INTO departments (\
                id, name, code, description, manager, budget, location, \
                parent_id, is_active, established_date, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::TEXT, \
                $5::VARCHAR, $6::NUMERIC, $7::VARCHAR, \
                $8::UUID, $9::BOOLEAN, $10::DATE, \
                $11::TIMESTAMPTZ, $12::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                code = EXCLUDED.code, \
                description = EXCLUDED.description, \
                manager = EXCLUDED.manager, \
                budget = EXCLUDED.budget, \
                location = EXCLUDED.location, \
                parent_id = EXCLUDED.parent_id, \
                is_active = EXCLUDED.is_active, \
                established_date = EXCLUDED.established_date, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &code,
                &description,
                &manager,
                &budget,
                &location,
                &parent,
                &is_active,
                &established_date,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
