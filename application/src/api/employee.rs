//! [`Employee`]-related REST API definitions.

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use common::{Amount, Date, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, department, employee, Email},
    query, Query as _,
};

use crate::{api, AsError, Error, Service};

/// Builds the [`Router`] of [`Employee`] endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/:id", get(get_by_id).put(update).delete(delete))
        .route("/employees/number/:employee_id", get(get_by_number))
        .route("/employees/email/:email", get(get_by_email))
        .route("/employees/department/:department", get(list_by_department))
        .route("/employees/status/:status", get(list_by_status))
        .route("/employees/manager/:manager", get(list_by_manager))
        .route("/employees/exists/:employee_id", get(exists))
        .route("/employees/exists/email/:email", get(exists_by_email))
}

/// Employee of the organization.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: employee::Id,

    /// Business number of this [`Employee`].
    pub employee_id: employee::Number,

    /// First name of this [`Employee`].
    pub first_name: employee::Name,

    /// Last name of this [`Employee`].
    pub last_name: employee::Name,

    /// Email of this [`Employee`].
    pub email: Email,

    /// Phone of this [`Employee`].
    pub phone: Option<employee::Phone>,

    /// Name of the department of this [`Employee`].
    pub department: department::Name,

    /// Position of this [`Employee`].
    pub position: Option<employee::Position>,

    /// Manager of this [`Employee`].
    pub manager: Option<employee::Manager>,

    /// Hire date of this [`Employee`].
    pub hire_date: Option<Date>,

    /// Salary of this [`Employee`].
    pub salary: Option<Amount>,

    /// Status of this [`Employee`].
    pub status: employee::Status,

    /// [`DateTime`] when this [`Employee`] was created.
    pub created_at: DateTime,

    /// [`DateTime`] when this [`Employee`] was last updated.
    pub updated_at: DateTime,
}

impl From<domain::Employee> for Employee {
    fn from(employee: domain::Employee) -> Self {
        let domain::Employee {
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

        Self {
            id,
            employee_id: number,
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
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Editable state of an [`Employee`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    /// Business number of the [`Employee`].
    pub employee_id: employee::Number,

    /// First name of the [`Employee`].
    pub first_name: employee::Name,

    /// Last name of the [`Employee`].
    pub last_name: employee::Name,

    /// Email of the [`Employee`].
    pub email: Email,

    /// Phone of the [`Employee`].
    #[serde(default)]
    pub phone: Option<employee::Phone>,

    /// Name of the department of the [`Employee`].
    pub department: department::Name,

    /// Position of the [`Employee`].
    #[serde(default)]
    pub position: Option<employee::Position>,

    /// Manager of the [`Employee`].
    #[serde(default)]
    pub manager: Option<employee::Manager>,

    /// Hire date of the [`Employee`].
    #[serde(default)]
    pub hire_date: Option<Date>,

    /// Salary of the [`Employee`].
    #[serde(default)]
    pub salary: Option<Amount>,

    /// Status of the [`Employee`].
    #[serde(default)]
    pub status: employee::Status,
}

impl From<EmployeeInput> for command::CreateEmployee {
    fn from(input: EmployeeInput) -> Self {
        let EmployeeInput {
            employee_id,
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
        } = input;

        Self {
            number: employee_id,
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
        }
    }
}

/// Converts [`domain::Employee`]s into a response.
fn list_of(employees: Vec<domain::Employee>) -> Json<Vec<Employee>> {
    Json(employees.into_iter().map(Into::into).collect())
}

async fn list(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<Employee>>, Error> {
    svc.execute(query::employees::All::by(()))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn get_by_id(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, Error> {
    svc.execute(query::employee::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|e| Json(e.into()))
        .ok_or_else(Error::not_found)
}

async fn get_by_number(
    Extension(svc): Extension<Service>,
    Path(number): Path<String>,
) -> Result<Json<Employee>, Error> {
    let number = api::filter(&number).ok_or_else(Error::not_found)?;
    svc.execute(query::employee::ByNumber::by(number))
        .await
        .map_err(AsError::into_error)?
        .map(|e| Json(e.into()))
        .ok_or_else(Error::not_found)
}

async fn get_by_email(
    Extension(svc): Extension<Service>,
    Path(email): Path<String>,
) -> Result<Json<Employee>, Error> {
    let email = api::filter(&email).ok_or_else(Error::not_found)?;
    svc.execute(query::employee::ByEmail::by(email))
        .await
        .map_err(AsError::into_error)?
        .map(|e| Json(e.into()))
        .ok_or_else(Error::not_found)
}

async fn list_by_department(
    Extension(svc): Extension<Service>,
    Path(department): Path<String>,
) -> Result<Json<Vec<Employee>>, Error> {
    let Some(department) = api::filter(&department) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::employees::ByDepartment::by(department))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_status(
    Extension(svc): Extension<Service>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Employee>>, Error> {
    let Some(status) = api::filter(&status) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::employees::ByStatus::by(status))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn list_by_manager(
    Extension(svc): Extension<Service>,
    Path(manager): Path<String>,
) -> Result<Json<Vec<Employee>>, Error> {
    let Some(manager) = api::filter(&manager) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::employees::ByManager::by(manager))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn exists(
    Extension(svc): Extension<Service>,
    Path(number): Path<String>,
) -> Result<Json<bool>, Error> {
    let Some(number) = api::filter(&number) else {
        return Ok(Json(false));
    };
    svc.execute(query::employee::ExistsByNumber::by(number))
        .await
        .map(|exists| Json(exists.get()))
        .map_err(AsError::into_error)
}

async fn exists_by_email(
    Extension(svc): Extension<Service>,
    Path(email): Path<String>,
) -> Result<Json<bool>, Error> {
    let Some(email) = api::filter(&email) else {
        return Ok(Json(false));
    };
    svc.execute(query::employee::ExistsByEmail::by(email))
        .await
        .map(|exists| Json(exists.get()))
        .map_err(AsError::into_error)
}

async fn create(
    Extension(svc): Extension<Service>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreateEmployee::from(input))
        .await
        .map(|e| Json(e.into()))
        .map_err(AsError::into_error)
}

async fn update(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdateEmployee {
        id,
        employee: input.into(),
    })
    .await
    .map(|e| Json(e.into()))
    .map_err(AsError::into_error)
}

async fn delete(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeleteEmployee::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::create_employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmployeeNotExists(_) => Some(Error::not_found()),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{command, domain::employee};

    use super::EmployeeInput;

    #[test]
    fn deserializes_camel_case_input_with_defaults() {
        let input: EmployeeInput = serde_json::from_value(json!({
            "employeeId": "EMP-001",
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane.doe@example.com",
            "department": "Engineering",
            "salary": 5000.5,
        }))
        .unwrap();

        let cmd = command::CreateEmployee::from(input);
        assert_eq!(cmd.number.to_string(), "EMP-001");
        assert_eq!(cmd.status, employee::Status::Active);
        assert_eq!(cmd.salary.unwrap().to_string(), "5000.5");
        assert!(cmd.manager.is_none());
    }

    #[test]
    fn rejects_invalid_email() {
        let res = serde_json::from_value::<EmployeeInput>(json!({
            "employeeId": "EMP-001",
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "not-an-email",
            "department": "Engineering",
        }));

        assert!(res.is_err());
    }

    #[test]
    fn parses_status_path_values() {
        assert_eq!(
            crate::api::filter::<employee::Status>("ON_LEAVE"),
            Some(employee::Status::OnLeave),
        );
        assert_eq!(crate::api::filter::<employee::Status>("on_leave"), None);
    }
}
