//! [`Performance`] definitions.

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::Employee;

/// Performance review of an [`Employee`].
#[derive(Clone, Debug)]
pub struct Performance {
    /// ID of this [`Performance`] review.
    pub id: Id,

    /// [`employee::Number`] of the reviewed [`Employee`].
    pub employee_id: employee::Number,

    /// [`ReviewPeriod`] this [`Performance`] review covers.
    pub review_period: ReviewPeriod,

    /// [`Rating`] given by this [`Performance`] review.
    pub rating: Rating,

    /// Comments of the reviewer.
    pub comments: Option<String>,
}

define_id! {
    #[doc = "ID of a [`Performance`] review."]
    Id
}

define_text! {
    #[doc = "Period covered by a [`Performance`] review (like `2024-Q1`)."]
    ReviewPeriod(max = 64)
}

define_text! {
    #[doc = "Free-form rating of a [`Performance`] review (like `EXCELLENT` \
             or `4/5`)."]
    Rating(max = 64)
}
