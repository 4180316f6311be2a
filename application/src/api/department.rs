//! [`Department`]-related REST API definitions.

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
    domain::{self, department, employee},
    query, Query as _,
};

use crate::{api, define_error, AsError, Error, Service};

/// Builds the [`Router`] of [`Department`] endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/departments", get(list).post(create))
        .route(
            "/departments/:id",
            get(get_by_id).put(update).delete(delete),
        )
        .route("/departments/:id/stats", get(stats))
        .route("/departments/code/:code", get(get_by_code))
}

/// Organization unit employees work in.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// ID of this [`Department`].
    pub id: department::Id,

    /// Unique name of this [`Department`].
    pub name: department::Name,

    /// Unique short code of this [`Department`].
    pub code: department::Code,

    /// Description of this [`Department`].
    pub description: Option<String>,

    /// Business number of the manager of this [`Department`].
    pub manager: Option<employee::Number>,

    /// Budget of this [`Department`].
    pub budget: Option<department::Budget>,

    /// Location of this [`Department`].
    pub location: Option<department::Location>,

    /// ID of the parent of this [`Department`].
    pub parent_department: Option<department::Id>,

    /// Whether this [`Department`] is in use.
    pub is_active: bool,

    /// Date this [`Department`] was established at.
    pub established_date: Option<Date>,

    /// [`DateTime`] when this [`Department`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`Department`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::Department> for Department {
    fn from(department: domain::Department) -> Self {
        let domain::Department {
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

        Self {
            id,
            name,
            code,
            description,
            manager,
            budget,
            location,
            parent_department: parent,
            is_active,
            established_date,
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Editable state of a [`Department`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    /// Unique name of the [`Department`].
    pub name: department::Name,

    /// Unique short code of the [`Department`], upper-cased on input.
    pub code: department::Code,

    /// Description of the [`Department`].
    #[serde(default)]
    pub description: Option<String>,

    /// Business number of the manager of the [`Department`].
    #[serde(default)]
    pub manager: Option<employee::Number>,

    /// Non-negative budget of the [`Department`].
    #[serde(default)]
    pub budget: Option<department::Budget>,

    /// Location of the [`Department`].
    #[serde(default)]
    pub location: Option<department::Location>,

    /// ID of the parent of the [`Department`].
    #[serde(default)]
    pub parent_department: Option<department::Id>,

    /// Whether the [`Department`] is in use.
    #[serde(default = "active")]
    pub is_active: bool,

    /// Date the [`Department`] was established at.
    #[serde(default)]
    pub established_date: Option<Date>,
}

/// Default of [`DepartmentInput::is_active`].
const fn active() -> bool {
    true
}

impl From<DepartmentInput> for command::CreateDepartment {
    fn from(input: DepartmentInput) -> Self {
        let DepartmentInput {
            name,
            code,
            description,
            manager,
            budget,
            location,
            parent_department,
            is_active,
            established_date,
        } = input;

        Self {
            name,
            code,
            description,
            manager,
            budget,
            location,
            parent: parent_department,
            is_active,
            established_date,
        }
    }
}

/// Headcount and salary figures of a [`Department`].
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of active employees.
    pub total_employees: usize,

    /// Average salary of the active employees.
    pub average_salary: Amount,

    /// Sum of the salaries of the active employees.
    pub total_salary_budget: Amount,
}

impl From<department::Stats> for Stats {
    fn from(stats: department::Stats) -> Self {
        let department::Stats {
            total_employees,
            average_salary,
            total_salary_budget,
        } = stats;

        Self {
            total_employees,
            average_salary,
            total_salary_budget,
        }
    }
}

/// Query parameters of the [`Department`]s listing.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Whether deleted [`Department`]s are listed too.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Converts [`domain::Department`]s into a response.
fn list_of(departments: Vec<domain::Department>) -> Json<Vec<Department>> {
    Json(departments.into_iter().map(Into::into).collect())
}

async fn list(
    Extension(svc): Extension<Service>,
    params: Result<Params<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Department>>, Error> {
    let Params(ListParams { include_inactive }) =
        params.map_err(AsError::into_error)?;
    let res = if include_inactive {
        svc.execute(query::departments::All::by(())).await
    } else {
        svc.execute(query::departments::Active::by(department::Active))
            .await
    };
    res.map(list_of).map_err(AsError::into_error)
}

async fn get_by_id(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Department>, Error> {
    svc.execute(query::department::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|d| Json(d.into()))
        .ok_or_else(Error::not_found)
}

async fn get_by_code(
    Extension(svc): Extension<Service>,
    Path(code): Path<String>,
) -> Result<Json<Department>, Error> {
    let code = api::filter(&code).ok_or_else(Error::not_found)?;
    svc.execute(query::department::ByCode::by(code))
        .await
        .map_err(AsError::into_error)?
        .map(|d| Json(d.into()))
        .ok_or_else(Error::not_found)
}

async fn stats(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Stats>, Error> {
    svc.execute(query::department::Stats { id: api::id(&id)? })
        .await
        .map_err(AsError::into_error)?
        .map(|s| Json(s.into()))
        .ok_or_else(Error::not_found)
}

async fn create(
    Extension(svc): Extension<Service>,
    body: Result<Json<DepartmentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Department>), Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreateDepartment::from(input))
        .await
        .map(|d| (StatusCode::CREATED, Json(d.into())))
        .map_err(AsError::into_error)
}

async fn update(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<DepartmentInput>, JsonRejection>,
) -> Result<Json<Department>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdateDepartment {
        id,
        department: input.into(),
    })
    .await
    .map(|d| Json(d.into()))
    .map_err(AsError::into_error)
}

async fn delete(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeleteDepartment { id: api::id(&id)? })
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

define_error! {
    enum DepartmentError {
        #[code = "DEPARTMENT_NAME_EXISTS"]
        #[status = BAD_REQUEST]
        #[message = "Department name already exists"]
        NameOccupied,

        #[code = "DEPARTMENT_CODE_EXISTS"]
        #[status = BAD_REQUEST]
        #[message = "Department code already exists"]
        CodeOccupied,

        #[code = "DEPARTMENT_HAS_ACTIVE_EMPLOYEES"]
        #[status = BAD_REQUEST]
        #[message = "Cannot delete department with active employees"]
        HasActiveEmployees,

        #[code = "AMOUNT_OVERFLOW"]
        #[status = BAD_REQUEST]
        #[message = "Department salaries are too large to be totaled"]
        SalaryOverflow,
    }
}

impl AsError for command::create_department::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied => Some(DepartmentError::NameOccupied.into()),
            Self::CodeOccupied => Some(DepartmentError::CodeOccupied.into()),
        }
    }
}

impl AsError for command::update_department::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DepartmentNotExists(_) => Some(Error::not_found()),
            Self::NameOccupied => Some(DepartmentError::NameOccupied.into()),
            Self::CodeOccupied => Some(DepartmentError::CodeOccupied.into()),
        }
    }
}

impl AsError for command::delete_department::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DepartmentNotExists(_) => Some(Error::not_found()),
            Self::HasActiveEmployees(_) => {
                Some(DepartmentError::HasActiveEmployees.into())
            }
        }
    }
}

impl AsError for query::department::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SalaryOverflow => Some(DepartmentError::SalaryOverflow.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::command;

    use crate::AsError as _;

    use super::{DepartmentInput, ListParams};

    #[test]
    fn defaults_to_active_department() {
        let input: DepartmentInput = serde_json::from_value(json!({
            "name": "Engineering",
            "code": "eng",
            "budget": 125000.5,
        }))
        .unwrap();

        let cmd = command::CreateDepartment::from(input);
        assert!(cmd.is_active);
        assert_eq!(cmd.code.to_string(), "ENG");
        assert_eq!(
            cmd.budget.map(common::Amount::from),
            Some("125000.5".parse().unwrap()),
        );
        assert!(cmd.parent.is_none());
    }

    #[test]
    fn rejects_negative_budget() {
        let res = serde_json::from_value::<DepartmentInput>(json!({
            "name": "Engineering",
            "code": "ENG",
            "budget": -1,
        }));

        assert!(res.is_err());
    }

    #[test]
    fn lists_active_departments_by_default() {
        let params: ListParams = serde_json::from_value(json!({})).unwrap();
        assert!(!params.include_inactive);

        let params: ListParams =
            serde_json::from_value(json!({"includeInactive": true})).unwrap();
        assert!(params.include_inactive);
    }

    #[test]
    fn maps_active_employees_to_bad_request() {
        let err =
            command::delete_department::ExecutionError::HasActiveEmployees(2)
                .as_error();

        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "DEPARTMENT_HAS_ACTIVE_EMPLOYEES");
        assert_eq!(
            err.message,
            "Cannot delete department with active employees",
        );
    }
}
