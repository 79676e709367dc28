// ABOUTME: Project directory resolution and workspace detection for the tox integration
// ABOUTME: Provides cwd template substitution with ancestor-based workspace discovery

pub mod detect;
pub mod error;
pub mod paths;
pub mod resolve;
pub mod template;

pub use detect::{DEFAULT_MARKERS, DEFAULT_MAX_DEPTH, default_markers, find_workspace_folder};
pub use error::{ResolveError, Result};
pub use paths::normalize_path;
pub use resolve::resolve_project_dir;
