//! [`Employee`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{department, employee, Email, Employee},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `employees` table selected into an [`Employee`].
const COLUMNS: &str = "\
    id, employee_id, \
    first_name, last_name, \
    email, phone, \
    department, position, manager, \
    hire_date, salary, status, \
    created_at, updated_at";

/// Reads an [`Employee`] from the provided [`Row`].
fn from_row(row: &Row) -> Employee {
    Employee {
        id: row.get("id"),
        number: row.get("employee_id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        department: row.get("department"),
        position: row.get("position"),
        manager: row.get("manager"),
        hire_date: row.get("hire_date"),
        salary: row.get("salary"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<Employee>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Employee>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM employees ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Employee>, department::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Employee>, department::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let department = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM employees \
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

impl<C> Database<Select<By<Vec<Employee>, employee::Status>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Employee>, employee::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM employees \
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

impl<C> Database<Select<By<Vec<Employee>, employee::Manager>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Employee>, employee::Manager>>,
    ) -> Result<Self::Ok, Self::Err> {
        let manager = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM employees \
             WHERE manager = $1::VARCHAR \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&manager])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Employee>, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM employees WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Employee>, employee::Number>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE employee_id = $1::VARCHAR",
        );
        Ok(self
            .query_opt(sql.as_str(), &[&number])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Employee>, Email>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM employees WHERE email = $1::VARCHAR");
        Ok(self
            .query_opt(sql.as_str(), &[&email])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<read::Exists<Employee>, employee::Number>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::Exists<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::Exists<Employee>, employee::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS (\
                SELECT 1 FROM employees WHERE employee_id = $1::VARCHAR\
            ) AS exists";
        let exists: bool = self
            .query_opt(SQL, &[&number])
            .await
            .map_err(tracerr::wrap!())?
            .is_some_and(|row| row.get("exists"));
        Ok(exists.into())
    }
}

impl<C> Database<Select<By<read::Exists<Employee>, Email>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::Exists<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::Exists<Employee>, Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS (\
                SELECT 1 FROM employees WHERE email = $1::VARCHAR\
            ) AS exists";
        let exists: bool = self
            .query_opt(SQL, &[&email])
            .await
            .map_err(tracerr::wrap!())?
            .is_some_and(|row| row.get("exists"));
        Ok(exists.into())
    }
}

impl<C> Database<Insert<Employee>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Employee>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(employee): Insert<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(employee))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Employee>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(employee): Update<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        let Employee {
            id,
            number,
            first_name,
            last_name,
            email,
            phone,
            department,
            position,
            manager,
            hire_date,
            salary,
            status,
            created_at,
            updated_at,
        } = employee;

        const SQL: &str = "\
            INSERT INTO employees (\
                id, employee_id, \
                first_name, last_name, \
                email, phone, \
                department, position, manager, \
                hire_date, salary, status, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR, $8::VARCHAR, $9::VARCHAR, \
                $10::DATE, $11::NUMERIC, $12::INT2, \
                $13::TIMESTAMPTZ, $14::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET employee_id = EXCLUDED.employee_id, \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                department = EXCLUDED.department, \
                position = EXCLUDED.position, \
                manager = EXCLUDED.manager, \
                hire_date = EXCLUDED.hire_date, \
                salary = EXCLUDED.salary, \
                status = EXCLUDED.status, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &number,
                &first_name,
                &last_name,
                &email,
                &phone,
                &department,
                &position,
                &manager,
                &hire_date,
                &salary,
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

impl<C> Database<Delete<By<Employee, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Employee, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM employees WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
