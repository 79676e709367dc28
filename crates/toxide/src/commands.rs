// ABOUTME: Command entry points: pick tox environments and run them in a terminal
// ABOUTME: Resolution failures propagate; listing failures surface through the host notifier

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use toxide_host::{DEFAULT_TERMINAL_NAME, HostContext, get_or_create};
use toxide_logging::{debug, info};
use toxide_project::resolve_project_dir;
use toxide_runner::{EnvLister, EnvName, ToxRunner};

/// Command handlers registered with the host.
///
/// The host context supplies editor state; the runner builds the command
/// text and, in production, also backs the lister.
pub struct Commands {
    host: HostContext,
    runner: ToxRunner,
    lister: Arc<dyn EnvLister>,
}

impl Commands {
    pub fn new(host: HostContext, runner: ToxRunner, lister: Arc<dyn EnvLister>) -> Self {
        Self {
            host,
            runner,
            lister,
        }
    }

    /// Wire the runner as both the command-text builder and the lister
    pub fn with_runner(host: HostContext, runner: ToxRunner) -> Self {
        let lister: Arc<dyn EnvLister> = Arc::new(runner.clone());
        Self::new(host, runner, lister)
    }

    /// Pick one environment and run it in the tox terminal
    pub async fn select(&self) -> Result<()> {
        let dir = resolve_project_dir(&self.host)?;
        let Some(envs) = self.list_envs_or_report(&dir).await else {
            return Ok(());
        };

        let items: Vec<String> = envs.iter().map(|env| env.as_str().to_string()).collect();
        let Some(choice) = self.host.picker.pick_one(&items).await else {
            debug!("Environment pick dismissed");
            return Ok(());
        };

        self.run(&dir, &[EnvName::new(choice)])
    }

    /// Pick any number of environments and run them together
    pub async fn select_multiple(&self) -> Result<()> {
        let dir = resolve_project_dir(&self.host)?;
        let Some(envs) = self.list_envs_or_report(&dir).await else {
            return Ok(());
        };

        let items: Vec<String> = envs.iter().map(|env| env.as_str().to_string()).collect();
        let Some(choices) = self.host.picker.pick_many(&items).await else {
            debug!("Environment pick dismissed");
            return Ok(());
        };
        if choices.is_empty() {
            debug!("Environment pick confirmed with no choices");
            return Ok(());
        }

        let envs: Vec<EnvName> = choices.into_iter().map(EnvName::new).collect();
        self.run(&dir, &envs)
    }

    /// Resolve the project directory and list its environments
    pub async fn list(&self) -> Result<Vec<EnvName>> {
        let dir = resolve_project_dir(&self.host)?;
        Ok(self.lister.list_envs(&dir).await?)
    }

    /// List environments, reporting failures through the host notifier.
    ///
    /// `None` means the failure was already surfaced and the command should
    /// return without further action.
    async fn list_envs_or_report(&self, dir: &Path) -> Option<Vec<EnvName>> {
        match self.lister.list_envs(dir).await {
            Ok(envs) => Some(envs),
            Err(err) => {
                self.host.notifier.show_error(&err.to_string());
                None
            }
        }
    }

    fn run(&self, dir: &Path, envs: &[EnvName]) -> Result<()> {
        let text = self.runner.run_command_text(envs);
        let terminal = get_or_create(self.host.terminals.as_ref(), dir, DEFAULT_TERMINAL_NAME)?;
        terminal.show();
        terminal.send_text(&text)?;
        info!(
            working_dir = %dir.display(),
            command = %text,
            "Dispatched tox run"
        );
        Ok(())
    }
}
