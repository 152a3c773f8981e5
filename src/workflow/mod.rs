pub mod collection;
pub mod command;
pub mod controller;
pub mod error_channel;
pub mod state;

pub use collection::DocumentCollection;
pub use command::Command;
pub use controller::{GenerateResult, WorkflowController};
pub use error_channel::ErrorChannel;
pub use state::{RowView, Snapshot, WorkflowState};
