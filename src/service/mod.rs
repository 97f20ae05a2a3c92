//! Classification service and per-user session state.

pub mod classify;
pub mod session;

pub use classify::{
    ClassificationRequest, ClassificationService, ModelSelection, Notice, Severity,
};
pub use session::{Session, SessionId, SessionStore};
