//! Typed client for the Quayside form API.
//!
//! Mirrors the browser side of the submission pipeline: field validation
//! before anything touches the network, multipart transport with a busy
//! guard, and a renderer that folds the server's outcome back into UI
//! state. Used by integration tooling and the end-to-end tests.

pub mod flow;
pub mod form;
pub mod outcome;
pub mod render;
pub mod transport;
pub mod validate;

pub use flow::SubmissionDriver;
pub use form::{FieldControl, FileUpload, FormDocument, FormField};
pub use outcome::SubmissionOutcome;
pub use render::{Banner, BannerKind, SubmissionPhase, UiState};
pub use transport::{SubmitClient, TransportError};
