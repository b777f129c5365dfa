pub mod session;
pub mod submit_ctx;

pub use session::{SubmitOutcome, TrimSession};
pub use submit_ctx::SubmitCtx;
