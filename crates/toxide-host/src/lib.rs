// ABOUTME: Host editor abstraction layer for the tox integration
// ABOUTME: Capability traits, terminal session provider, and an in-memory test host

pub mod context;
pub mod error;
pub mod memory;
pub mod terminal;
pub mod types;

pub use context::{
    DocumentAccess, HostContext, Notifier, Picker, Settings, TestTree, WorkspaceFolders,
};
pub use error::{HostError, Result};
pub use memory::{MemoryHost, MemoryTerminal, MemoryTerminalRegistry};
pub use terminal::{DEFAULT_TERMINAL_NAME, TerminalHandle, TerminalRegistry, get_or_create};
pub use types::{Document, TestItem, WorkspaceFolder};
