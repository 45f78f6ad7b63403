//! # temascope
//!
//! A read-only dashboard over the artifacts exported by the TCC
//! topic-modeling pipeline: discover the project root, load the export batch
//! into memory once, and serve five exploration pages over HTTP.
//!
//! ## Architecture
//!
//! - **Root discovery** (`paths`): bounded upward walk for the `data/` and
//!   `notebooks/` marker directories
//! - **Artifact store** (`artifact`): seven parquet tables plus a JSON
//!   manifest, decoded via arrow/serde_arrow into plain row structs
//! - **Pages** (`pages`): pure renderers from the store and a typed request
//!   to serializable view models
//! - **HTTP surface** (`server`): axum JSON API plus an embedded frontend
//!
//! ## Library usage
//!
//! ```
//! use temascope::artifact::{ArtifactStore, ArtifactTables};
//! use temascope::pages::{self, PageRequest, PageView, RenderOptions};
//!
//! let store = ArtifactStore::from_parts(ArtifactTables::default());
//! let view = pages::render(&store, RenderOptions::default(), &PageRequest::Overview).unwrap();
//! assert!(matches!(view, PageView::Overview(_)));
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod pages;
pub mod paths;
pub mod server;
