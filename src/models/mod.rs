pub mod document;
pub mod intake;
pub mod job;
pub mod loaders;
pub mod split;

pub use document::{DocumentEntry, DocumentId, DocumentKey, UploadedDocument};
pub use intake::IntakeFile;
pub use job::{JobDocument, JobManifest};
pub use loaders::{load_job_manifest, parse_job_manifest};
pub use split::{Artifact, SplitItem, SplitRequest};
