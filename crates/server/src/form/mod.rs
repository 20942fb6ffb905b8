//! Form submission pipeline.
//!
//! Each public form on the site maps to a [`FormEndpoint`] configuration:
//! field rules, spam policy, and notification template. Submissions flow
//! through CSRF verification, validation, the spam screen, and mail
//! dispatch, producing a [`SubmissionOutcome`] either way.

pub mod csrf;
pub mod endpoint;
pub mod outcome;
pub mod spam;
pub mod submission;
pub mod validate;

pub use endpoint::{FormEndpoint, FormKind};
pub use outcome::SubmissionOutcome;
pub use submission::{Attachment, Submission};
