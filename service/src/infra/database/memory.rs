//! In-memory [`Database`] implementation.
//!
//! Mirrors the behavior of [`Postgres`] (insertion order, unique constraints)
//! without any persistence.
//!
//! [`Postgres`]: crate::infra::Postgres

use std::sync::Arc;

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{
        attendance, department, employee, job_application, job_posting, leave,
        payroll, performance, user, Attendance, Department, Email, Employee,
        JobApplication, JobPosting, Leave, Payroll, Performance, User,
    },
    infra::{database, Database},
    read,
};

/// In-memory [`Database`] client.
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<Collections>>);

/// Collections of entities stored in a [`Memory`] database, each one in the
/// insertion order.
#[derive(Debug, Default)]
pub struct Collections {
    employees: Vec<Employee>,
    leaves: Vec<Leave>,
    payrolls: Vec<Payroll>,
    job_postings: Vec<JobPosting>,
    job_applications: Vec<JobApplication>,
    performances: Vec<Performance>,
    users: Vec<User>,
    departments: Vec<Department>,
    attendances: Vec<Attendance>,
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Unique constraint is violated.
    #[display("Unique constraint `{_0}` is violated")]
    UniqueViolation(#[error(not(source))] &'static str),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            Self::UniqueViolation(name) => {
                constraint.map_or(true, |c| c == *name)
            }
        }
    }
}

/// Entity stored in its own [`Memory`] collection.
pub trait Document: Clone + Send + Sync + Sized + 'static {
    /// Type of the identifier of this [`Document`].
    type Id: Copy + Eq + Send + Sync;

    /// Returns the identifier of this [`Document`].
    fn id(&self) -> Self::Id;

    /// Returns the collection of this [`Document`] type.
    fn collection(c: &Collections) -> &Vec<Self>;

    /// Returns the mutable collection of this [`Document`] type.
    fn collection_mut(c: &mut Collections) -> &mut Vec<Self>;

    /// Returns the name of a unique constraint violated by storing this
    /// [`Document`] next to the `other` one, if any.
    fn conflicts_with(&self, _other: &Self) -> Option<&'static str> {
        None
    }
}

/// Predicate of a [`Document`] matching the selector `F`.
pub trait Matches<F> {
    /// Checks whether this value is selected by the provided `filter`.
    fn matches(&self, filter: &F) -> bool;
}

impl<T> Matches<()> for T {
    fn matches(&self, (): &()) -> bool {
        true
    }
}

impl<E, F> Database<Select<By<Vec<E>, F>>> for Memory
where
    E: Document + Matches<F>,
{
    type Ok = Vec<E>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<E>, F>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(E::collection(&*self.0.read().await)
            .iter()
            .filter(|e| <E as Matches<F>>::matches(e, &filter))
            .cloned()
            .collect())
    }
}

impl<E, F> Database<Select<By<Option<E>, F>>> for Memory
where
    E: Document + Matches<F>,
{
    type Ok = Option<E>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<E>, F>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(E::collection(&*self.0.read().await)
            .iter()
            .find(|e| <E as Matches<F>>::matches(e, &filter))
            .cloned())
    }
}

impl<E, F> Database<Select<By<read::Exists<E>, F>>> for Memory
where
    E: Document + Matches<F>,
{
    type Ok = read::Exists<E>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::Exists<E>, F>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(E::collection(&*self.0.read().await)
            .iter()
            .any(|e| <E as Matches<F>>::matches(e, &filter))
            .into())
    }
}

impl<E: Document> Database<Insert<E>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(doc): Insert<E>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(doc)).await.map_err(tracerr::wrap!())
    }
}

impl<E: Document> Database<Update<E>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(doc): Update<E>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut collections = self.0.write().await;
        let docs = E::collection_mut(&mut collections);

        let id = doc.id();
        if let Some(name) = docs
            .iter()
            .filter(|d| d.id() != id)
            .find_map(|d| doc.conflicts_with(d))
        {
            return Err(tracerr::map_from(tracerr::new!(
                Error::UniqueViolation(name)
            )));
        }

        if let Some(existing) = docs.iter_mut().find(|d| d.id() == id) {
            *existing = doc;
        } else {
            docs.push(doc);
        }
        Ok(())
    }
}

impl<E: Document> Database<Delete<By<E, E::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        E::collection_mut(&mut *self.0.write().await)
            .retain(|d| d.id() != id);
        Ok(())
    }
}

/// Implements [`Document`] for the provided entity stored in the provided
/// [`Collections`] field.
macro_rules! impl_document {
    ($entity:ty => $collection:ident, $id:ty) => {
        impl Document for $entity {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn collection(c: &Collections) -> &Vec<Self> {
                &c.$collection
            }

            fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
                &mut c.$collection
            }
        }
    };
    (
        $entity:ty => $collection:ident, $id:ty,
        unique { $($field:ident: $constraint:literal),+ $(,)? }
    ) => {
        impl Document for $entity {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn collection(c: &Collections) -> &Vec<Self> {
                &c.$collection
            }

            fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
                &mut c.$collection
            }

            fn conflicts_with(&self, other: &Self) -> Option<&'static str> {
                $(
                    if self.$field == other.$field {
                        return Some($constraint);
                    }
                )+
                None
            }
        }
    };
}

/// Implements [`Matches`] for the provided entity by comparing the provided
/// field with the selector.
macro_rules! impl_matches {
    ($entity:ty { $($field:ident: $filter:ty),+ $(,)? }) => {
        $(
            impl Matches<$filter> for $entity {
                fn matches(&self, filter: &$filter) -> bool {
                    self.$field == *filter
                }
            }
        )+
    };
}

impl_document!(Employee => employees, employee::Id, unique {
    number: "employees_employee_id_key",
    email: "employees_email_key",
});
impl_matches!(Employee {
    id: employee::Id,
    number: employee::Number,
    email: Email,
    department: department::Name,
    status: employee::Status,
});
impl Matches<employee::Manager> for Employee {
    fn matches(&self, filter: &employee::Manager) -> bool {
        self.manager.as_ref() == Some(filter)
    }
}

impl_document!(Leave => leaves, leave::Id);
impl_matches!(Leave {
    id: leave::Id,
    employee_id: employee::Number,
    status: leave::Status,
    kind: leave::Kind,
});
impl Matches<leave::Approver> for Leave {
    fn matches(&self, filter: &leave::Approver) -> bool {
        self.approved_by.as_ref() == Some(filter)
    }
}

impl_document!(Payroll => payrolls, payroll::Id);
impl_matches!(Payroll {
    id: payroll::Id,
    employee_id: employee::Number,
    status: payroll::Status,
    period: payroll::Period,
});
impl Matches<payroll::PayDateRange> for Payroll {
    fn matches(&self, filter: &payroll::PayDateRange) -> bool {
        self.pay_date.is_some_and(|d| filter.contains(d))
    }
}

impl_document!(JobPosting => job_postings, job_posting::Id);
impl_matches!(JobPosting {
    id: job_posting::Id,
    status: job_posting::Status,
    department: department::Name,
    employment_type: job_posting::EmploymentType,
});
impl Matches<job_posting::Poster> for JobPosting {
    fn matches(&self, filter: &job_posting::Poster) -> bool {
        self.posted_by.as_ref() == Some(filter)
    }
}

impl_document!(JobApplication => job_applications, job_application::Id);
impl_matches!(JobApplication {
    id: job_application::Id,
    job_posting_id: job_posting::Id,
});

impl_document!(Performance => performances, performance::Id);
impl_matches!(Performance {
    id: performance::Id,
    employee_id: employee::Number,
});

impl_document!(User => users, user::Id, unique {
    username: "users_username_key",
    email: "users_email_key",
});
impl_matches!(User {
    username: user::Username,
    email: Email,
});

impl_document!(Department => departments, department::Id, unique {
    name: "departments_name_key",
    code: "departments_code_key",
});
impl_matches!(Department {
    id: department::Id,
    name: department::Name,
    code: department::Code,
});
impl Matches<department::Active> for Department {
    fn matches(&self, _: &department::Active) -> bool {
        self.is_active
    }
}

impl Document for Attendance {
    type Id = attendance::Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn collection(c: &Collections) -> &Vec<Self> {
        &c.attendances
    }

    fn collection_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.attendances
    }

    fn conflicts_with(&self, other: &Self) -> Option<&'static str> {
        (self.employee_id == other.employee_id && self.date == other.date)
            .then_some("attendances_employee_id_date_key")
    }
}
impl_matches!(Attendance {
    id: attendance::Id,
    employee_id: employee::Number,
    date: common::Date,
    status: attendance::Status,
});
impl Matches<attendance::Day> for Attendance {
    fn matches(&self, filter: &attendance::Day) -> bool {
        self.employee_id == filter.employee_id && self.date == filter.date
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select, Update};

    use crate::{
        domain::{employee, performance, Performance},
        infra::Database as _,
        read,
    };

    use super::Memory;

    fn review(period: &str) -> Performance {
        Performance {
            id: performance::Id::new(),
            employee_id: "EMP-001".parse().unwrap(),
            review_period: period.parse().unwrap(),
            rating: "GOOD".parse().unwrap(),
            comments: None,
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order_on_upsert() {
        let db = Memory::default();
        let (first, mut second) = (review("2024-Q1"), review("2024-Q2"));
        db.execute(Insert(first.clone())).await.unwrap();
        db.execute(Insert(second.clone())).await.unwrap();

        second.rating = "EXCELLENT".parse().unwrap();
        db.execute(Update(first.clone())).await.unwrap();
        db.execute(Update(second.clone())).await.unwrap();

        let all = db
            .execute(Select(By::<Vec<Performance>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
        assert_eq!(all[1].rating.to_string(), "EXCELLENT");
    }

    #[tokio::test]
    async fn deletes_by_id() {
        let db = Memory::default();
        let doc = review("2024-Q1");
        db.execute(Insert(doc.clone())).await.unwrap();

        db.execute(Delete(By::<Performance, _>::new(doc.id)))
            .await
            .unwrap();

        let exists = db
            .execute(Select(By::<read::Exists<Performance>, _>::new(doc.id)))
            .await
            .unwrap();
        assert!(!exists.get());
    }

    #[tokio::test]
    async fn selects_by_typed_filter() {
        let db = Memory::default();
        let first = review("2024-Q1");
        let mut other = review("2024-Q2");
        other.employee_id = "EMP-002".parse().unwrap();
        db.execute(Insert(first.clone())).await.unwrap();
        db.execute(Insert(other.clone())).await.unwrap();

        let number: employee::Number = "EMP-002".parse().unwrap();
        let of_employee = db
            .execute(Select(By::<Vec<Performance>, _>::new(number)))
            .await
            .unwrap();
        assert_eq!(of_employee.len(), 1);
        assert_eq!(of_employee[0].id, other.id);

        let found = db
            .execute(Select(By::<Option<Performance>, _>::new(first.id)))
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.id), Some(first.id));

        let missing = db
            .execute(Select(By::<Option<Performance>, _>::new(
                performance::Id::new(),
            )))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
