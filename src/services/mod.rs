pub mod collaborators;
pub mod intake_guard;

pub use collaborators::{SplitCollaborator, UploadCollaborator};
pub use intake_guard::IntakeGuard;
