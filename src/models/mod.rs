pub mod loaders;
pub mod options;
pub mod payload;
pub mod resource;
pub mod selection;
pub mod session_state;

pub use loaders::{load_selection_from_folder, load_selection_from_paths};
pub use options::{FocusOption, SubmissionMode};
pub use payload::{PayloadPart, RequestPayload};
pub use resource::{BatchResult, BlobHandle, DispatchResult, ResultResource, SingleResult};
pub use selection::{FileSelection, SelectedFile};
pub use session_state::{ErrorCategory, SessionPhase, SessionState, Settlement, UserFacingError};
