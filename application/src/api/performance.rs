//! [`Performance`]-related REST API definitions.

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, employee, performance},
    query, Query as _,
};

use crate::{api, AsError, Error, Service};

/// Builds the [`Router`] of [`Performance`] endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/performance", get(list).post(create))
        .route(
            "/api/performance/:id",
            get(get_by_id).put(update).delete(delete),
        )
        .route("/api/performance/employee/:employee_id", get(list_by_employee))
}

/// Performance review of an employee.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    /// ID of this [`Performance`] review.
    pub id: performance::Id,

    /// Business number of the reviewed employee.
    pub employee_id: employee::Number,

    /// Period this [`Performance`] review covers.
    pub review_period: performance::ReviewPeriod,

    /// Rating given by this [`Performance`] review.
    pub performance_rating: performance::Rating,

    /// Comments of the reviewer.
    pub comments: Option<String>,
}

impl From<domain::Performance> for Performance {
    fn from(review: domain::Performance) -> Self {
        let domain::Performance {
            id,
            employee_id,
            review_period,
            rating,
            comments,
        } = review;

        Self {
            id,
            employee_id,
            review_period,
            performance_rating: rating,
            comments,
        }
    }
}

/// Editable state of a [`Performance`] review.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    /// Business number of the reviewed employee.
    pub employee_id: employee::Number,

    /// Period the [`Performance`] review covers.
    pub review_period: performance::ReviewPeriod,

    /// Rating given by the [`Performance`] review.
    pub performance_rating: performance::Rating,

    /// Comments of the reviewer.
    #[serde(default)]
    pub comments: Option<String>,
}

impl From<PerformanceInput> for command::CreatePerformance {
    fn from(input: PerformanceInput) -> Self {
        let PerformanceInput {
            employee_id,
            review_period,
            performance_rating,
            comments,
        } = input;

        Self {
            employee_id,
            review_period,
            rating: performance_rating,
            comments,
        }
    }
}

/// Converts [`domain::Performance`] reviews into a response.
fn list_of(reviews: Vec<domain::Performance>) -> Json<Vec<Performance>> {
    Json(reviews.into_iter().map(Into::into).collect())
}

async fn list(
    Extension(svc): Extension<Service>,
) -> Result<Json<Vec<Performance>>, Error> {
    svc.execute(query::performances::All::by(()))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn get_by_id(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<Performance>, Error> {
    svc.execute(query::performance::ById::by(api::id(&id)?))
        .await
        .map_err(AsError::into_error)?
        .map(|p| Json(p.into()))
        .ok_or_else(Error::not_found)
}

async fn list_by_employee(
    Extension(svc): Extension<Service>,
    Path(number): Path<String>,
) -> Result<Json<Vec<Performance>>, Error> {
    let Some(number) = api::filter(&number) else {
        return Ok(Json(vec![]));
    };
    svc.execute(query::performances::ByEmployee::by(number))
        .await
        .map(list_of)
        .map_err(AsError::into_error)
}

async fn create(
    Extension(svc): Extension<Service>,
    body: Result<Json<PerformanceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Performance>), Error> {
    let input = api::payload(body)?;
    svc.execute(command::CreatePerformance::from(input))
        .await
        .map(|p| (StatusCode::CREATED, Json(p.into())))
        .map_err(AsError::into_error)
}

async fn update(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<PerformanceInput>, JsonRejection>,
) -> Result<Json<Performance>, Error> {
    let id = api::id(&id)?;
    let input = api::payload(body)?;
    svc.execute(command::UpdatePerformance {
        id,
        review: input.into(),
    })
    .await
    .map(|p| Json(p.into()))
    .map_err(AsError::into_error)
}

async fn delete(
    Extension(svc): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    svc.execute(command::DeletePerformance::by(api::id(&id)?))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::create_performance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_performance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PerformanceNotExists(_) => Some(Error::not_found()),
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use service::{command, domain};

    use super::{Performance, PerformanceInput};

    #[test]
    fn maps_performance_rating() {
        let input: PerformanceInput = serde_json::from_value(json!({
            "employeeId": "EMP-001",
            "reviewPeriod": "2024-Q1",
            "performanceRating": "EXCELLENT",
        }))
        .unwrap();

        let cmd = command::CreatePerformance::from(input);
        assert_eq!(cmd.rating.to_string(), "EXCELLENT");
        assert!(cmd.comments.is_none());
    }

    #[test]
    fn serializes_without_timestamps() {
        let review = domain::Performance {
            id: domain::performance::Id::new(),
            employee_id: "EMP-001".parse().unwrap(),
            review_period: "2024-Q1".parse().unwrap(),
            rating: "GOOD".parse().unwrap(),
            comments: None,
        };

        let json = serde_json::to_value(Performance::from(review)).unwrap();
        assert_eq!(json["performanceRating"], "GOOD");
        assert_eq!(json["employeeId"], "EMP-001");
        assert!(json.get("createdAt").is_none());
    }
}
