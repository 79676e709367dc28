// ABOUTME: Console-facing host adapters: quick-pick menus, error output, tree printing
// ABOUTME: Menus render to stderr and read one stdin line; an empty line dismisses

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use toxide_host::{Notifier, Picker, TestItem, TestTree};
use toxide_logging::error;

/// Numbered quick-pick menu over stderr and stdin.
pub struct ConsolePicker;

#[async_trait]
impl Picker for ConsolePicker {
    async fn pick_one(&self, items: &[String]) -> Option<String> {
        if items.is_empty() {
            return None;
        }
        eprint!("{}> ", render_menu("Select a tox environment", items));
        let line = read_stdin_line().await?;
        parse_selection(&line, items)
    }

    async fn pick_many(&self, items: &[String]) -> Option<Vec<String>> {
        if items.is_empty() {
            return None;
        }
        eprint!(
            "{}> ",
            render_menu("Select tox environments (comma separated)", items)
        );
        let line = read_stdin_line().await?;
        parse_multi_selection(&line, items)
    }
}

async fn read_stdin_line() -> Option<String> {
    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    match reader.read_line(&mut line).await {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

fn render_menu(title: &str, items: &[String]) -> String {
    let mut menu = format!("{title}:\n");
    for (index, item) in items.iter().enumerate() {
        menu.push_str(&format!("  {}. {}\n", index + 1, item));
    }
    menu
}

/// A pick is a 1-based index or an exact item name. An empty line or an
/// unrecognized token dismisses the menu.
fn parse_selection(line: &str, items: &[String]) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        return items.get(index.checked_sub(1)?).cloned();
    }
    items.iter().find(|item| item.as_str() == trimmed).cloned()
}

fn parse_multi_selection(line: &str, items: &[String]) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut picked = Vec::new();
    for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let choice = parse_selection(token, items)?;
        if !picked.contains(&choice) {
            picked.push(choice);
        }
    }
    if picked.is_empty() { None } else { Some(picked) }
}

/// Error surfacing over stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn show_error(&self, message: &str) {
        error!(message = %message, "tox integration error");
        eprintln!("error: {message}");
    }
}

/// Test tree that prints updates as they arrive.
#[derive(Default)]
pub struct PrintingTestTree {
    items: Mutex<Vec<TestItem>>,
}

impl PrintingTestTree {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestTree for PrintingTestTree {
    fn upsert(&self, item: TestItem) {
        println!("test-tree: {} ({})", item.label, item.path.display());
        for child in &item.children {
            println!("  - {}", child.label);
        }

        let mut items = self.items.lock();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    fn remove(&self, id: &str) {
        println!("test-tree: removed {id}");
        self.items.lock().retain(|item| item.id != id);
    }

    fn items(&self) -> Vec<TestItem> {
        self.items.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        vec!["py39".to_string(), "py310".to_string(), "lint".to_string()]
    }

    #[test]
    fn test_menu_lists_numbered_items() {
        let menu = render_menu("Select a tox environment", &items());

        assert!(menu.starts_with("Select a tox environment:\n"));
        assert!(menu.contains("  1. py39\n"));
        assert!(menu.contains("  3. lint\n"));
    }

    #[test]
    fn test_selection_by_number_or_name() {
        assert_eq!(parse_selection("2\n", &items()), Some("py310".to_string()));
        assert_eq!(parse_selection(" lint \n", &items()), Some("lint".to_string()));
        assert_eq!(parse_selection("0", &items()), None);
        assert_eq!(parse_selection("4", &items()), None);
        assert_eq!(parse_selection("py38", &items()), None);
        assert_eq!(parse_selection("\n", &items()), None);
    }

    #[test]
    fn test_multi_selection_mixes_numbers_and_names() {
        assert_eq!(
            parse_multi_selection("1, lint\n", &items()),
            Some(vec!["py39".to_string(), "lint".to_string()])
        );
        // Duplicate picks collapse
        assert_eq!(parse_multi_selection("1,py39", &items()), Some(vec!["py39".to_string()]));
        // One bad token dismisses the whole pick
        assert_eq!(parse_multi_selection("1,nope", &items()), None);
        assert_eq!(parse_multi_selection("", &items()), None);
    }

    #[test]
    fn test_printing_tree_tracks_items() {
        let tree = PrintingTestTree::new();
        tree.upsert(TestItem::new("a", "tox.ini", "/ws/a/tox.ini"));
        tree.upsert(TestItem::new("a", "tox.ini", "/ws/a/tox.ini"));

        assert_eq!(tree.items().len(), 1);

        tree.remove("a");
        assert!(tree.items().is_empty());
    }
}
