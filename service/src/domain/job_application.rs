//! [`JobApplication`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};

use crate::domain::{job_posting, user, Email};
#[cfg(doc)]
use crate::domain::{JobPosting, User};

/// Application of a candidate to a [`JobPosting`].
#[derive(Clone, Debug)]
pub struct JobApplication {
    /// ID of this [`JobApplication`].
    pub id: Id,

    /// ID of the [`JobPosting`] applied to.
    pub job_posting_id: job_posting::Id,

    /// ID of the [`User`] who applied, if registered.
    pub user_id: Option<user::Id>,

    /// [`ApplicantName`] of the candidate.
    pub applicant_name: Option<ApplicantName>,

    /// Contact [`Email`] of the candidate.
    pub email: Option<Email>,

    /// Cover letter of the candidate.
    pub cover_letter: Option<String>,

    /// [`Status`] of this [`JobApplication`].
    pub status: Status,

    /// [`DateTime`] when this [`JobApplication`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`JobApplication`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id! {
    #[doc = "ID of a [`JobApplication`]."]
    Id
}

define_text! {
    #[doc = "Name of a candidate in a [`JobApplication`]."]
    ApplicantName(max = 512)
}

define_kind! {
    #[doc = "Status of a [`JobApplication`]."]
    enum Status {
        #[doc = "[`JobApplication`] is submitted and awaits a review."]
        Submitted = 1,

        #[doc = "[`JobApplication`] is reviewed."]
        Reviewed = 2,

        #[doc = "Candidate is accepted."]
        Accepted = 3,

        #[doc = "Candidate is rejected."]
        Rejected = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Submitted
    }
}

/// [`DateTime`] when a [`JobApplication`] was created.
pub type CreationDateTime = DateTimeOf<(JobApplication, unit::Creation)>;

/// [`DateTime`] when a [`JobApplication`] was last updated.
pub type UpdateDateTime = DateTimeOf<(JobApplication, unit::Modification)>;
