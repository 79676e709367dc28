// ABOUTME: In-memory host implementation with scripted picks and recorded effects
// ABOUTME: Backs deterministic tests for command flows without a real editor process

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::{
    DocumentAccess, HostContext, Notifier, Picker, Settings, TestTree, WorkspaceFolders,
};
use crate::error::Result;
use crate::terminal::{TerminalHandle, TerminalRegistry};
use crate::types::{Document, TestItem, WorkspaceFolder};

/// Terminal session that records everything sent to it.
pub struct MemoryTerminal {
    name: String,
    dir: PathBuf,
    sent: Mutex<Vec<String>>,
    shows: Mutex<usize>,
}

impl MemoryTerminal {
    fn new(name: &str, dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            sent: Mutex::new(Vec::new()),
            shows: Mutex::new(0),
        }
    }

    /// Every line sent to this session, in order
    pub fn sent_text(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// How many times the session was brought into view
    pub fn show_count(&self) -> usize {
        *self.shows.lock()
    }
}

impl TerminalHandle for MemoryTerminal {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn working_dir(&self) -> PathBuf {
        self.dir.clone()
    }

    fn show(&self) {
        *self.shows.lock() += 1;
    }

    fn send_text(&self, text: &str) -> Result<()> {
        self.sent.lock().push(text.to_string());
        Ok(())
    }
}

/// Registry of in-memory terminal sessions.
#[derive(Default)]
pub struct MemoryTerminalRegistry {
    sessions: Mutex<Vec<Arc<MemoryTerminal>>>,
}

impl MemoryTerminalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete session handles for assertions
    pub fn sessions(&self) -> Vec<Arc<MemoryTerminal>> {
        self.sessions.lock().clone()
    }
}

impl TerminalRegistry for MemoryTerminalRegistry {
    fn terminals(&self) -> Vec<Arc<dyn TerminalHandle>> {
        self.sessions
            .lock()
            .iter()
            .map(|s| s.clone() as Arc<dyn TerminalHandle>)
            .collect()
    }

    fn create(&self, name: &str, dir: &Path) -> Result<Arc<dyn TerminalHandle>> {
        let session = Arc::new(MemoryTerminal::new(name, dir));
        self.sessions.lock().push(session.clone());
        Ok(session)
    }
}

/// Scriptable host backed entirely by memory.
///
/// Builder methods set up the editor state; `enqueue_*` methods script pick
/// answers in FIFO order (an exhausted script answers as a dismissed pick).
/// Recorded effects are read back through the accessor methods.
pub struct MemoryHost {
    active: Mutex<Option<Document>>,
    folders: Mutex<Vec<WorkspaceFolder>>,
    cwd_template: Mutex<Option<String>>,
    pub terminals: Arc<MemoryTerminalRegistry>,
    errors: Mutex<Vec<String>>,
    pick_one_script: Mutex<VecDeque<Option<String>>>,
    pick_many_script: Mutex<VecDeque<Option<Vec<String>>>>,
    offered_items: Mutex<Vec<Vec<String>>>,
    tree_items: Mutex<Vec<TestItem>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            active: Mutex::new(None),
            folders: Mutex::new(Vec::new()),
            cwd_template: Mutex::new(None),
            terminals: Arc::new(MemoryTerminalRegistry::new()),
            errors: Mutex::new(Vec::new()),
            pick_one_script: Mutex::new(VecDeque::new()),
            pick_many_script: Mutex::new(VecDeque::new()),
            offered_items: Mutex::new(Vec::new()),
            tree_items: Mutex::new(Vec::new()),
        }
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active_document(self, path: impl Into<PathBuf>) -> Self {
        *self.active.lock() = Some(Document::new(path));
        self
    }

    pub fn with_folder(self, root: impl Into<PathBuf>) -> Self {
        self.folders.lock().push(WorkspaceFolder::new(root));
        self
    }

    pub fn with_cwd_template(self, template: impl Into<String>) -> Self {
        *self.cwd_template.lock() = Some(template.into());
        self
    }

    /// Script the answer to the next single pick
    pub fn enqueue_pick_one(&self, answer: Option<&str>) {
        self.pick_one_script
            .lock()
            .push_back(answer.map(|s| s.to_string()));
    }

    /// Script the answer to the next multi pick
    pub fn enqueue_pick_many(&self, answer: Option<Vec<&str>>) {
        self.pick_many_script
            .lock()
            .push_back(answer.map(|v| v.iter().map(|s| s.to_string()).collect()));
    }

    /// Error messages shown so far, in order
    pub fn shown_errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// Item lists offered to the picker, one entry per pick call
    pub fn offered_items(&self) -> Vec<Vec<String>> {
        self.offered_items.lock().clone()
    }

    /// Wire this host into a `HostContext`; clone the `Arc` first to keep a
    /// handle for assertions
    pub fn context(self: Arc<Self>) -> HostContext {
        HostContext {
            documents: self.clone(),
            workspace: self.clone(),
            settings: self.clone(),
            terminals: self.terminals.clone(),
            picker: self.clone(),
            notifier: self.clone(),
            test_tree: self,
        }
    }
}

impl DocumentAccess for MemoryHost {
    fn active_document(&self) -> Option<Document> {
        self.active.lock().clone()
    }
}

impl WorkspaceFolders for MemoryHost {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.lock().clone()
    }
}

impl Settings for MemoryHost {
    fn working_dir_template(&self) -> Option<String> {
        self.cwd_template.lock().clone()
    }
}

impl Notifier for MemoryHost {
    fn show_error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}

#[async_trait]
impl Picker for MemoryHost {
    async fn pick_one(&self, items: &[String]) -> Option<String> {
        self.offered_items.lock().push(items.to_vec());
        self.pick_one_script.lock().pop_front().flatten()
    }

    async fn pick_many(&self, items: &[String]) -> Option<Vec<String>> {
        self.offered_items.lock().push(items.to_vec());
        self.pick_many_script.lock().pop_front().flatten()
    }
}

impl TestTree for MemoryHost {
    fn upsert(&self, item: TestItem) {
        let mut items = self.tree_items.lock();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    fn remove(&self, id: &str) {
        self.tree_items.lock().retain(|item| item.id != id);
    }

    fn items(&self) -> Vec<TestItem> {
        self.tree_items.lock().clone()
    }
}
