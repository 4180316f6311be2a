//! [`Payroll`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        employee,
        payroll::{self, Deductions, Earnings, Period, Totals},
        Payroll,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `payrolls` table selected into a [`Payroll`].
const COLUMNS: &str = "\
    id, employee_id, employee_name, \
    pay_period_start, pay_period_end, \
    basic_salary, allowances, overtime, bonuses, gross_pay, \
    tax_deduction, health_insurance, retirement_fund, other_deductions, \
    total_deductions, net_pay, \
    status, pay_date, \
    created_at, updated_at";

/// Reads a [`Payroll`] from the provided [`Row`].
fn from_row(row: &Row) -> Payroll {
    Payroll {
        id: row.get("id"),
        employee_id: row.get("employee_id"),
        employee_name: row.get("employee_name"),
        period: Period {
            start: row.get("pay_period_start"),
            end: row.get("pay_period_end"),
        },
        earnings: Earnings {
            basic_salary: row.get("basic_salary"),
            allowances: row.get("allowances"),
            overtime: row.get("overtime"),
            bonuses: row.get("bonuses"),
        },
        deductions: Deductions {
            tax: row.get("tax_deduction"),
            health_insurance: row.get("health_insurance"),
            retirement_fund: row.get("retirement_fund"),
            other: row.get("other_deductions"),
        },
        totals: Totals {
            gross_pay: row.get("gross_pay"),
            total_deductions: row.get("total_deductions"),
            net_pay: row.get("net_pay"),
        },
        status: row.get("status"),
        pay_date: row.get("pay_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<Payroll>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Payroll>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!("SELECT {COLUMNS} FROM payrolls ORDER BY seq");
        Ok(self
            .query(sql.as_str(), &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Payroll>, employee::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payroll>, employee::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM payrolls \
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

impl<C> Database<Select<By<Vec<Payroll>, payroll::Status>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payroll>, payroll::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM payrolls \
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

impl<C> Database<Select<By<Vec<Payroll>, Period>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payroll>, Period>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Period { start, end } = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM payrolls \
             WHERE pay_period_start IS NOT DISTINCT FROM $1::DATE \
               AND pay_period_end IS NOT DISTINCT FROM $2::DATE \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&start, &end])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Payroll>, payroll::PayDateRange>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payroll>, payroll::PayDateRange>>,
    ) -> Result<Self::Ok, Self::Err> {
        let payroll::PayDateRange { from, to } = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM payrolls \
             WHERE pay_date BETWEEN $1::DATE AND $2::DATE \
             ORDER BY seq",
        );
        Ok(self
            .query(sql.as_str(), &[&from, &to])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Payroll>, payroll::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payroll>, payroll::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM payrolls WHERE id = $1::UUID");
        Ok(self
            .query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Payroll>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Payroll>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payroll): Insert<Payroll>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(payroll))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Payroll>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(payroll): Update<Payroll>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payroll {
            id,
            employee_id,
            employee_name,
            period,
            earnings,
            deductions,
            totals,
            status,
            pay_date,
            created_at,
            updated_at,
        } = payroll;

        const SQL: &str = "\
            INSERT INTO payrolls (\
                id, employee_id, employee_name, \
                pay_period_start, pay_period_end, \
                basic_salary, allowances, overtime, bonuses, gross_pay, \
                tax_deduction, health_insurance, retirement_fund, \
                other_deductions, total_deductions, net_pay, \
                status, pay_date, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::DATE, $5::DATE, \
                $6::NUMERIC, $7::NUMERIC, $8::NUMERIC, $9::NUMERIC, \
                $10::NUMERIC, \
                $11::NUMERIC, $12::NUMERIC, $13::NUMERIC, \
                $14::NUMERIC, $15::NUMERIC, $16::NUMERIC, \
                $17::INT2, $18::DATE, \
                $19::TIMESTAMPTZ, $20::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET employee_id = EXCLUDED.employee_id, \
                employee_name = EXCLUDED.employee_name, \
                pay_period_start = EXCLUDED.pay_period_start, \
                pay_period_end = EXCLUDED.pay_period_end, \
                basic_salary = EXCLUDED.basic_salary, \
                allowances = EXCLUDED.allowances, \
                overtime = EXCLUDED.overtime, \
                bonuses = EXCLUDED.bonuses, \
                gross_pay = EXCLUDED.gross_pay, \
                tax_deduction = EXCLUDED.tax_deduction, \
                health_insurance = EXCLUDED.health_insurance, \
                retirement_fund = EXCLUDED.retirement_fund, \
                other_deductions = EXCLUDED.other_deductions, \
                total_deductions = EXCLUDED.total_deductions, \
                net_pay = EXCLUDED.net_pay, \
                status = EXCLUDED.status, \
                pay_date = EXCLUDED.pay_date, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &employee_name,
                &period.start,
                &period.end,
                &earnings.basic_salary,
                &earnings.allowances,
                &earnings.overtime,
                &earnings.bonuses,
                &totals.gross_pay,
                &deductions.tax,
                &deductions.health_insurance,
                &deductions.retirement_fund,
                &deductions.other,
                &totals.total_deductions,
                &totals.net_pay,
                &status,
                &pay_date,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Payroll, payroll::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Payroll, payroll::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM payrolls WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
