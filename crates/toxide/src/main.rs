// ABOUTME: toxide binary entry point: logging, configuration, host wiring
// ABOUTME: Maps subcommands onto the command handlers and drains terminals on exit

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use toxide::cli::{Cli, Command};
use toxide::commands::Commands;
use toxide::config::Config;
use toxide::host::{
    CliDocuments, CliSettings, ConsolePicker, PrintingTestTree, PtyTerminalRegistry,
    StaticFolders, StderrNotifier,
};
use toxide::test_tree;
use toxide::watcher::{ToxIniWatcher, WATCHED_FILE_NAME, drive};
use toxide_host::{HostContext, TerminalHandle, TestTree, WorkspaceFolder};
use toxide_logging::{info, warn};
use toxide_project::{DEFAULT_MAX_DEPTH, default_markers, find_workspace_folder};
use toxide_runner::ToxRunner;

fn setup_logging(verbosity: u8) -> Result<()> {
    use toxide_logging::{Level, LoggingConfig, init_logging_with_config};

    let mut config = LoggingConfig::from_env().context("read logging environment")?;

    // -v stacks: warn by default, then info, debug, trace
    config.level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
    .into();

    init_logging_with_config(config).context("install logging subscriber")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let file = match command_file(&cli.command) {
        Some(path) => Some(std::path::absolute(path).context("resolve FILE argument")?),
        None => None,
    };

    // The configuration file lives in the workspace folder, which is found
    // with the default markers before the configured ones are known
    let config_root = detect_root(file.as_deref(), &default_markers()).await?;
    let config = load_config(cli.config.as_deref(), config_root.as_deref())?;

    match &cli.command {
        Command::Select { .. } => {
            let host = build_host(&config, cli.cwd, file).await?;
            let commands = Commands::with_runner(host.context.clone(), ToxRunner::new());
            commands.select().await?;
            drain_terminals(&host.terminals).await
        }
        Command::SelectMultiple { .. } => {
            let host = build_host(&config, cli.cwd, file).await?;
            let commands = Commands::with_runner(host.context.clone(), ToxRunner::new());
            commands.select_multiple().await?;
            drain_terminals(&host.terminals).await
        }
        Command::List { .. } => {
            let host = build_host(&config, cli.cwd, file).await?;
            let commands = Commands::with_runner(host.context.clone(), ToxRunner::new());
            for env in commands.list().await? {
                println!("{env}");
            }
            Ok(())
        }
        Command::Watch { dir } => watch(dir.clone()).await,
    }
}

fn command_file(command: &Command) -> Option<&Path> {
    match command {
        Command::Select { file } | Command::SelectMultiple { file } | Command::List { file } => {
            file.as_deref()
        }
        Command::Watch { .. } => None,
    }
}

async fn detect_root(file: Option<&Path>, markers: &[String]) -> Result<Option<PathBuf>> {
    let Some(file) = file else {
        return Ok(None);
    };
    Ok(find_workspace_folder(file, markers, DEFAULT_MAX_DEPTH).await?)
}

fn load_config(explicit: Option<&Path>, workspace: Option<&Path>) -> Result<Config> {
    match Config::load(explicit, workspace) {
        Ok(config) => Ok(config),
        Err(err) if explicit.is_some() => Err(err),
        Err(err) => {
            warn!(error = %err, "Failed to load configuration, using defaults");
            Ok(Config::default())
        }
    }
}

struct Host {
    context: HostContext,
    terminals: Arc<PtyTerminalRegistry>,
}

async fn build_host(
    config: &Config,
    cwd_flag: Option<String>,
    file: Option<PathBuf>,
) -> Result<Host> {
    let folders = detect_root(file.as_deref(), &config.markers)
        .await?
        .map(WorkspaceFolder::new)
        .into_iter()
        .collect();
    let terminals = Arc::new(PtyTerminalRegistry::new());
    let template = cwd_flag.or_else(|| config.cwd.clone());

    let context = HostContext {
        documents: Arc::new(CliDocuments::new(file)),
        workspace: Arc::new(StaticFolders::new(folders)),
        settings: Arc::new(CliSettings::new(template)),
        terminals: terminals.clone(),
        picker: Arc::new(ConsolePicker),
        notifier: Arc::new(StderrNotifier),
        test_tree: Arc::new(PrintingTestTree::new()),
    };

    Ok(Host { context, terminals })
}

/// Stop each shell and stream its remaining output.
///
/// The `exit` line queues behind any running command, so output keeps
/// flowing until the dispatched tox run finishes and the shell ends.
async fn drain_terminals(registry: &PtyTerminalRegistry) -> Result<()> {
    for session in registry.sessions() {
        if let Err(err) = session.send_text("exit") {
            warn!(error = %err, "Failed to send exit to terminal session");
        }
        if let Some(mut output_rx) = session.take_output() {
            let mut stdout = std::io::stdout();
            while let Some(chunk) = output_rx.recv().await {
                stdout.write_all(&chunk).context("write terminal output")?;
                stdout.flush().ok();
            }
        }
    }
    Ok(())
}

async fn watch(dir: Option<PathBuf>) -> Result<()> {
    let root = match dir {
        Some(dir) => std::path::absolute(&dir).context("resolve DIR argument")?,
        None => std::env::current_dir().context("determine current directory")?,
    };

    let tree: Arc<dyn TestTree> = Arc::new(PrintingTestTree::new());

    // Seed the tree when tox.ini is already present
    let existing = root.join(WATCHED_FILE_NAME);
    let present = tokio::fs::metadata(&existing)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if present {
        test_tree::upsert_file(tree.as_ref(), &existing);
    }

    info!(root = %root.display(), "Watching for tox.ini changes");
    let tox_watcher = ToxIniWatcher::new(std::slice::from_ref(&root))?;
    drive(tox_watcher, tree).await;
    Ok(())
}
