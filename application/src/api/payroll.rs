//! [`Payroll`]-related REST API definitions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query as Params,
    },
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use common::{Amount, Date, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, employee, payroll},
    query, Query as _,
};

use crate::{api, define_error, AsError, Error, Service};

/// Builds the [`Router`] of [`Payroll`] endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/payroll", get(list).post(create))
        .route("/payroll/period", get(list_by_period))
        .route("/payroll/pay-date", get(list_by_pay_date))
        .route("/payroll/:id", get(get_by_id).put(update).delete(delete))
        .route("/payroll/employee/:employee_id", get(list_by_employee))
        .route("/payroll/status/:status", get(list_by_status))
}

/// Payroll record of an employee for a single pay period.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    /// ID of this [`Payroll`].
    pub id: payroll::Id,

    /// Business number of the paid employee.
    pub employee_id: employee::Number,

    /// Display name of the paid employee.
    pub employee_name: Option<payroll::EmployeeName>,

    /// First day of the pay period.
    pub pay_period_start: Option<Date>,

    /// Last day of the pay period.
    pub pay_period_end: Option<Date>,

    /// Basic salary for the period.
    pub basic_salary: Amount,

    /// Allowances paid on top of the salary.
    pub allowances: Amount,

    /// Overtime pay.
    pub overtime: Amount,

    /// Bonuses.
    pub bonuses: Amount,

    /// Sum of all the earnings.
    pub gross_pay: Amount,

    /// Withheld tax.
    pub tax_deduction: Amount,

    /// Health insurance contribution.
    pub health_insurance: Amount,

    /// Retirement fund contribution.
    pub retirement_fund: Amount,

    /// Any other deductions.
    pub other_deductions: Amount,

    /// Sum of all the deductions.
    pub total_deductions: Amount,

    /// Gross pay minus total deductions.
    pub net_pay: Amount,

    /// Status of this [`Payroll`].
    pub status: payroll::Status,

    /// Date this [`Payroll`] is paid at.
    pub pay_date: Option<Date>,

    /// [`DateTime`] when this [`Payroll`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`Payroll`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::Payroll> for Payroll {
    fn from(payroll: domain::Payroll) -> Self {
        let domain::Payroll {
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

        Self {
            id,
            employee_id,
            employee_name,
            pay_period_start: period.start,
            pay_period_end: period.end,
            basic_salary: earnings.basic_salary,
            allowances: earnings.allowances,
            overtime: earnings.overtime,
            bonuses: earnings.bonuses,
            gross_pay: totals.gross_pay,
            tax_deduction: deductions.tax,
            health_insurance: deductions.health_insurance,
            retirement_fund: deductions.retirement_fund,
            other_deductions: deductions.other,
            total_deductions: totals.total_deductions,
            net_pay: totals.net_pay,
            status,
            pay_date,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Editable state of a [`Payroll`].
///
/// Totals are not accepted, as they're always calculated.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollInput {
    /// Business number of the paid employee.
    pub employee_id: employee::Number,

    /// Display name of the paid employee.
    #[serde(default)]
    pub employee_name: Option<payroll::EmployeeName>,

    /// First day of the pay period.
    #[serde(default)]
    pub pay_period_start: Option<Date>,

    /// Last day of the pay period.
    #[serde(default)]
    pub pay_period_end: Option<Date>,

    /// Basic salary for the period.
    #[serde(default)]
    pub basic_salary: Amount,

    /// Allowances paid on top of the salary.
    #[serde(default)]
    pub allowances: Amount,

    /// Overtime pay.
    #[serde(default)]
    pub overtime: Amount,

    /// Bonuses.
    #[serde(default)]
    pub bonuses: Amount,

    /// Withheld tax.
    #[serde(default)]
    pub tax_deduction: Amount,

    /// Health insurance contribution.
    #[serde(default)]
    pub health_insurance: Amount,

    /// Retirement fund contribution.
    #[serde(default)]
    pub retirement_fund: Amount,

    /// Any other deductions.
    #[serde(default)]
    pub other_deductions: Amount,

    /// Status of the [`Payroll`].
    #[serde(default)]
    pub status: payroll::Status,

    /// Date the [`Payroll`] is paid at.
    #[serde(default)]
    pub pay_date: Option<Date>,
}

impl From<PayrollInput> for command::CreatePayroll {
    fn from(input: PayrollInput) -> Self {
        let PayrollInput {
            employee_id,
            employee_name,
            pay_period_start,
            pay_period_end,
            basic_salary,
            allowances,
            overtime,
            bonuses,
            tax_deduction,
            health_insurance,
            retirement_fund,
            other_deductions,
            status,
            pay_date,
        } = input;

        Self {
            employee_id,
            employee_name,
            period: payroll::Period {
                start: pay_period_start,
                end: pay_period_end,
            },
            earnings: payroll::Earnings {
                basic_salary,
                allowances,
                overtime,
                bonuses,
            },
            deductions: payroll::Deductions {
                tax: tax_deduction,
                health_insurance,
                retirement_fund,
                other: other_deductions,
            },
            status,
            pay_date,
        }
    }
}

/// Query parameters selecting a pay period.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PeriodParams {
    /// First day of the pay period.
    pub start: Option<Date>,

    /// Last day of the pay period.
    pub end: Option<Date>,
}

/// Query parameters selecting an inclusive range of pay dates.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PayDateParams {
    /// Earliest pay date.
    pub from: Date,

    /// Latest pay date.
    pub to: Date,
}

impl From<PayDateParams> for payroll::PayDateRange {
    fn from(params: PayDateParams) -> Self {
        let PayDateParams { from, to } = params;
        Self { from, to }
    }
}

/// Converts [`domain::Payroll`]s into a response.
fn list_of(payrolls: Vec<domain::Payroll>) -> Json<Vec<Payroll>> {
    Json(payrolls.into_iter().map(Into::into).collect())
}

async fn list(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<Payroll>>, Error> {
    svc.execute(query::payrolls::All::by(()))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn get_by_id(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Payroll>, Error> {
    svc.execute(query::payroll::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|p| Json(p.into()))
        .ok_or_else(Error::not_found)
}

async fn list_by_employee(
    Extension(svc): Extension<Service>,
    Path(number): Path<String>,
) -> Result<Json<Vec<Payroll>>, Error> {
    let Some(number) = api::filter(&number) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::payrolls::ByEmployee::by(number))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_status(
    Extension(svc): Extension<Service>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Payroll>>, Error> {
    let Some(status) = api::filter(&status) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::payrolls::ByStatus::by(status))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_period(
    Extension(svc): Extension<Service>,
    params: Result<Params<PeriodParams>, QueryRejection>,
) -> Result<Json<Vec<Payroll>>, Error> {
    let Params(PeriodParams { start, end }) =
        params.map_err(AsError::into_error)?;
    svc.execute(query::payrolls::ByPeriod::by(payroll::Period { start, end }))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_pay_date(
    Extension(svc): Extension<Service>,
    params: Result<Params<PayDateParams>, QueryRejection>,
) -> Result<Json<Vec<Payroll>>, Error> {
    let Params(params) = params.map_err(AsError::into_error)?;
    svc.execute(query::payrolls::ByPayDate::by(params.into()))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn create(
    Extension(svc): Extension<Service>,
    body: Result<Json<PayrollInput>, JsonRejection>,
) -> Result<Json<Payroll>, Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreatePayroll::from(input))
        .await
        .map(|p| Json(p.into()))
        .map_err(AsError::into_error)
}

async fn update(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<PayrollInput>, JsonRejection>,
) -> Result<Json<Payroll>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdatePayroll {
        id,
        payroll: input.into(),
    })
    .await
    .map(|p| Json(p.into()))
    .map_err(AsError::into_error)
}

async fn delete(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeletePayroll::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

define_error! {
    enum AmountError {
        #[code = "AMOUNT_OVERFLOW"]
        #[status = BAD_REQUEST]
        #[message = "Payroll amounts are too large to be totaled"]
        Overflow,
    }
}

impl AsError for command::create_payroll::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AmountOverflow(_) => Some(AmountError::Overflow.into()),
        }
    }
}

impl AsError for command::update_payroll::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PayrollNotExists(_) => Some(Error::not_found()),
            Self::AmountOverflow(_) => Some(AmountError::Overflow.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{command, domain::payroll};

    use crate::AsError as _;

    use super::{PayDateParams, PayrollInput};

    #[test]
    fn defaults_missing_amounts_to_zero() {
        let input: PayrollInput = serde_json::from_value(json!({
            "employeeId": "EMP-001",
            "basicSalary": 4000,
            "taxDeduction": 800.25,
            "grossPay": 1,
            "netPay": 1,
        }))
        .unwrap();

        let cmd = command::CreatePayroll::from(input);
        assert_eq!(cmd.earnings.basic_salary.to_string(), "4000");
        assert_eq!(cmd.earnings.bonuses, common::Amount::ZERO);
        assert_eq!(cmd.deductions.tax.to_string(), "800.25");
        assert_eq!(cmd.status, payroll::Status::Draft);
        assert!(cmd.period.start.is_none());
    }

    #[test]
    fn rejects_unknown_status() {
        let res = serde_json::from_value::<PayrollInput>(json!({
            "employeeId": "EMP-001",
            "status": "CANCELLED",
        }));

        assert!(res.is_err());
    }

    #[test]
    fn requires_both_pay_date_bounds() {
        let params: PayDateParams = serde_json::from_value(json!({
            "from": "2024-07-01",
            "to": "2024-07-31",
        }))
        .unwrap();
        let range = payroll::PayDateRange::from(params);
        assert!(range.contains("2024-07-31".parse().unwrap()));

        let res = serde_json::from_value::<PayDateParams>(json!({
            "from": "2024-07-01",
        }));
        assert!(res.is_err());
    }

    #[test]
    fn maps_amount_overflow_to_bad_request() {
        let create = command::create_payroll::ExecutionError::AmountOverflow(
            payroll::AmountOverflowError,
        )
        .as_error();
        let update = command::update_payroll::ExecutionError::AmountOverflow(
            payroll::AmountOverflowError,
        )
        .as_error();

        for err in [create, update] {
            assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
            assert_eq!(err.code, "AMOUNT_OVERFLOW");
        }
    }
}
