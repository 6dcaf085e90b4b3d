//! # Formkit Core
//!
//! Form-definition state container for the formkit visual form builder.
//!
//! The crate owns the ordered list of fields being composed, the current
//! selection and the edit/preview mode. Renderers read it; palette buttons,
//! drag handles and property editors call its mutation operations.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! All fallible operations return `Result`. Lookups of unknown field ids are
//! absorbed as no-ops; malformed input is rejected before it reaches the
//! field collection.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
mod error;
pub mod preview;

pub use config::Config;
pub use domain::{
    DragOutcome, DragSession, EditorMode, Field, FieldError, FieldId, FieldIdGenerator,
    FieldKind, FieldSpec, FieldUpdate, FormDefinitionStore, FormEvent, FormSnapshot,
    IdentifierError, OptionEdit, Palette, RecordedEvent, StoreError, Validation,
    EVENT_LOG_CAPACITY,
};
pub use error::{Error, Result};
pub use preview::{
    option_value, validate_submission, AcceptedSubmission, FieldValue, FieldViolation,
    Submission, SubmissionRejected,
};
