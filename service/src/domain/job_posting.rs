//! [`JobPosting`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Amount, Date, DateTimeOf};

use crate::domain::department;

/// Open (or past) position advertised by the organization.
#[derive(Clone, Debug)]
pub struct JobPosting {
    /// ID of this [`JobPosting`].
    pub id: Id,

    /// [`Title`] of this [`JobPosting`].
    pub title: Title,

    /// [`department::Name`] of the department hiring for this
    /// [`JobPosting`].
    pub department: department::Name,

    /// [`Location`] of the advertised position.
    pub location: Option<Location>,

    /// [`EmploymentType`] of the advertised position.
    pub employment_type: EmploymentType,

    /// Free-form description of the position.
    pub description: Option<String>,

    /// Free-form requirements to candidates.
    pub requirements: Option<String>,

    /// Skills expected from candidates.
    pub skills: Vec<String>,

    /// [`ExperienceLevel`] expected from candidates.
    pub experience_level: Option<ExperienceLevel>,

    /// [`SalaryRange`] offered for the position.
    pub salary: SalaryRange,

    /// Free-form description of benefits.
    pub benefits: Option<String>,

    /// [`Status`] of this [`JobPosting`].
    pub status: Status,

    /// Last [`Date`] applications are accepted at.
    pub application_deadline: Option<Date>,

    /// [`Poster`] of this [`JobPosting`].
    pub posted_by: Option<Poster>,

    /// [`DateTime`] when this [`JobPosting`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`JobPosting`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id! {
    #[doc = "ID of a [`JobPosting`]."]
    Id
}

define_text! {
    #[doc = "Title of a [`JobPosting`]."]
    Title(max = 512)
}

define_text! {
    #[doc = "Location of a position advertised by a [`JobPosting`]."]
    Location(max = 512)
}

define_text! {
    #[doc = "Reference to a person who posted a [`JobPosting`]."]
    Poster(max = 256)
}

/// Salary range of a [`JobPosting`].
///
/// Bounds are not required to be ordered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SalaryRange {
    /// Lower bound of this [`SalaryRange`].
    pub min: Amount,

    /// Upper bound of this [`SalaryRange`].
    pub max: Amount,
}

define_kind! {
    #[doc = "Type of employment offered by a [`JobPosting`]."]
    enum EmploymentType {
        #[doc = "Full-time employment."]
        FullTime = 1,

        #[doc = "Part-time employment."]
        PartTime = 2,

        #[doc = "Fixed-term contract."]
        Contract = 3,
    }
}

define_kind! {
    #[doc = "Experience level expected by a [`JobPosting`]."]
    enum ExperienceLevel {
        #[doc = "No experience required."]
        Entry = 1,

        #[doc = "Junior level."]
        Junior = 2,

        #[doc = "Senior level."]
        Senior = 3,

        #[doc = "Team lead level."]
        Lead = 4,

        #[doc = "Managerial level."]
        Manager = 5,
    }
}

define_kind! {
    #[doc = "Status of a [`JobPosting`]."]
    enum Status {
        #[doc = "[`JobPosting`] accepts applications."]
        Active = 1,

        #[doc = "[`JobPosting`] is temporarily hidden."]
        Inactive = 2,

        #[doc = "[`JobPosting`] is closed for good."]
        Closed = 3,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

/// [`DateTime`] when a [`JobPosting`] was created.
pub type CreationDateTime = DateTimeOf<(JobPosting, unit::Creation)>;

/// [`DateTime`] when a [`JobPosting`] was last updated.
pub type UpdateDateTime = DateTimeOf<(JobPosting, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{EmploymentType, Status};

    #[test]
    fn employment_type_text_representation() {
        assert_eq!(EmploymentType::FullTime.to_string(), "FULL_TIME");
        assert_eq!(
            "PART_TIME".parse::<EmploymentType>().unwrap(),
            EmploymentType::PartTime,
        );
        assert!("FULLTIME".parse::<EmploymentType>().is_err());
    }

    #[test]
    fn defaults_to_active() {
        assert_eq!(Status::default(), Status::Active);
    }
}
