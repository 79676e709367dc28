// ABOUTME: Path template placeholders and the ordered substitution table
// ABOUTME: Each pass rewrites the raw template, so the last matching pair decides the result

/// Placeholder for the root of the workspace folder containing the document.
pub const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

/// Placeholder for the directory containing the active document.
pub const FILE_WORKSPACE_FOLDER: &str = "${fileWorkspaceFolder}";

/// Apply an ordered list of `(placeholder, value)` substitutions to a
/// template.
///
/// Every pair is applied to the raw template independently, replacing the
/// first occurrence of its placeholder, and the output of the final pair is
/// the rendered result. A pair whose placeholder is absent leaves the
/// template untouched for that pass, so an earlier pair's replacement never
/// carries through once a later pair has run. Existing `cwd` settings
/// resolve against exactly this ordering.
pub fn apply(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (placeholder, value) in pairs {
        rendered = template.replacen(placeholder, value, 1);
    }
    rendered
}
