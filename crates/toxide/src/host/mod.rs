// ABOUTME: Host adapters backing the collaborator traits with real process facilities
// ABOUTME: Editor state from startup arguments, PTY terminals, and console prompts

pub mod console;
pub mod editor;
pub mod terminal;

pub use console::{ConsolePicker, PrintingTestTree, StderrNotifier};
pub use editor::{CliDocuments, CliSettings, StaticFolders};
pub use terminal::{PtyTerminal, PtyTerminalRegistry};
