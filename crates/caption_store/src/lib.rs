//! # Caption Store
//!
//! Persistence for caption transcripts and their generated summaries.
//!
//! Every video is keyed by a [`SafeKey`] derived from its title. Two artifacts
//! are kept per key: the raw transcript and the rendered Markdown summary.
//! The [`ArtifactStore`] trait is what the pipeline talks to; [`FsArtifactStore`]
//! lays the artifacts out as plain files on disk.

mod domain;
mod store;

pub use domain::SafeKey;
pub use store::fs::FsArtifactStore;
pub use store::{ArtifactKind, ArtifactStore};
