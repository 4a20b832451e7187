//! Query dispatch: one request/response cycle per user submission.

mod dispatcher;

pub use dispatcher::{BACKEND_UNREACHABLE_MESSAGE, QueryDispatcher, RejectReason, Submission};
