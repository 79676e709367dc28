// ABOUTME: Project directory resolution from the active document and workspace state
// ABOUTME: Applies the cwd override template and returns an absolute, normalized directory

use std::path::PathBuf;

use toxide_host::HostContext;
use toxide_logging::debug;

use crate::error::{ResolveError, Result};
use crate::paths::normalize_path;
use crate::template;

/// Resolve the directory tox commands should run in.
///
/// The decision follows the active document: inside a workspace folder the
/// folder root wins (subject to the `cwd` override template), outside one
/// the document's own directory wins. The result is always absolute and
/// lexically normalized; with no active document the whole operation fails
/// instead of guessing. Nothing is cached; every call re-reads the host.
pub fn resolve_project_dir(host: &HostContext) -> Result<PathBuf> {
    let document = host
        .documents
        .active_document()
        .ok_or(ResolveError::NoActiveDocument)?;
    let file_dir = document
        .parent_dir()
        .ok_or_else(|| ResolveError::no_parent_directory(document.path.clone()))?
        .to_path_buf();

    let resolved = match host.workspace.folder_containing(&document.path) {
        None => {
            debug!(
                document = %document.path.display(),
                dir = %file_dir.display(),
                "Document outside any workspace folder, using its parent directory"
            );
            file_dir
        }
        Some(folder) => {
            let template = host
                .settings
                .working_dir_template()
                .filter(|t| !t.is_empty());

            let dir = match template {
                None => folder.root.clone(),
                Some(template) => {
                    let rendered = template::apply(
                        &template,
                        &[
                            (template::WORKSPACE_FOLDER, &folder.root.to_string_lossy()),
                            (template::FILE_WORKSPACE_FOLDER, &file_dir.to_string_lossy()),
                        ],
                    );
                    let candidate = PathBuf::from(rendered);
                    if candidate.is_absolute() {
                        candidate
                    } else {
                        folder.root.join(candidate)
                    }
                }
            };

            debug!(
                workspace = %folder.root.display(),
                dir = %dir.display(),
                "Resolved project directory from workspace folder"
            );
            dir
        }
    };

    Ok(normalize_path(&resolved))
}
