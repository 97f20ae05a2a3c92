//! Serialized model artifacts.
//!
//! - [`format`]: the on-disk artifact format
//! - [`store`]: startup loading of the vectorizer and both classifiers

pub mod format;
pub mod store;

pub use format::{
    Artifact, ArtifactKind, decode_artifact, decode_serde, encode_artifact, encode_serde,
    load_artifact, save_artifact,
};
pub use store::{ArtifactSlot, ArtifactStatus, ArtifactStore};
