// ABOUTME: Skeletal test tree items derived from watched tox.ini files
// ABOUTME: One item per file carrying a single placeholder child; contents are never read

use std::path::Path;

use toxide_host::{TestItem, TestTree};
use toxide_logging::debug;

/// Child label shown under each tox.ini until real discovery exists.
pub const PLACEHOLDER_LABEL: &str = "placeholder";

/// Stable item id for a watched file
pub fn item_id(path: &Path) -> String {
    path.display().to_string()
}

/// Build the skeletal item for a tox.ini: the file node plus one
/// placeholder child.
pub fn skeletal_item(path: &Path) -> TestItem {
    let id = item_id(path);
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.clone());

    TestItem::new(id.clone(), label, path).with_child(TestItem::new(
        format!("{id}::{PLACEHOLDER_LABEL}"),
        PLACEHOLDER_LABEL,
        path,
    ))
}

/// Register or refresh the item for a created or changed tox.ini
pub fn upsert_file(tree: &dyn TestTree, path: &Path) {
    debug!(file = %path.display(), "Registering test tree item");
    tree.upsert(skeletal_item(path));
}

/// Drop the item for a deleted tox.ini
pub fn remove_file(tree: &dyn TestTree, path: &Path) {
    debug!(file = %path.display(), "Removing test tree item");
    tree.remove(&item_id(path));
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxide_host::MemoryHost;

    #[test]
    fn test_skeletal_item_has_one_placeholder_child() {
        let item = skeletal_item(Path::new("/ws/proj/tox.ini"));

        assert_eq!(item.id, "/ws/proj/tox.ini");
        assert_eq!(item.label, "tox.ini");
        assert_eq!(item.children.len(), 1);
        assert_eq!(item.children[0].label, PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_repeated_upserts_keep_one_item_per_file() {
        let host = MemoryHost::new();
        let path = Path::new("/ws/proj/tox.ini");

        upsert_file(&host, path);
        upsert_file(&host, path);
        upsert_file(&host, Path::new("/ws/other/tox.ini"));

        assert_eq!(host.items().len(), 2);
    }

    #[test]
    fn test_remove_drops_only_the_matching_item() {
        let host = MemoryHost::new();
        upsert_file(&host, Path::new("/ws/a/tox.ini"));
        upsert_file(&host, Path::new("/ws/b/tox.ini"));

        remove_file(&host, Path::new("/ws/a/tox.ini"));

        let items = host.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "/ws/b/tox.ini");
    }
}
