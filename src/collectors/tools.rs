use crate::config::ToolsConfig;
use crate::error::{LifetimeError, Result};
use nix::unistd::geteuid;
use std::path::PathBuf;
use std::process::Command;
use which::which;

/// Resolved executables for one run.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// None when already running as root
    pub sudo:          Option<PathBuf>,
    pub smartctl:      PathBuf,
    pub smartctl_args: Vec<String>,
}

impl Toolchain {
    /// Look up the configured tools on PATH for the current user.
    pub fn resolve(cfg: &ToolsConfig) -> Result<Self> {
        Self::resolve_as(cfg, geteuid().is_root())
    }

    /// sudo is neither required nor looked up when `is_root` is set.
    pub fn resolve_as(cfg: &ToolsConfig, is_root: bool) -> Result<Self> {
        let sudo = if is_root { None } else { Some(locate(&cfg.sudo)?) };
        let smartctl = locate(&cfg.smartctl)?;
        tracing::debug!(?sudo, smartctl = %smartctl.display(), "resolved tools");
        Ok(Self { sudo, smartctl, smartctl_args: cfg.smartctl_args.clone() })
    }

    /// `[sudo] smartctl <args> <device>`
    pub fn smartctl_command(&self, device: &str) -> Command {
        let mut cmd = match &self.sudo {
            Some(sudo) => {
                let mut c = Command::new(sudo);
                c.arg(&self.smartctl);
                c
            }
            None => Command::new(&self.smartctl),
        };
        cmd.args(&self.smartctl_args).arg(device);
        cmd
    }
}

fn locate(tool: &str) -> Result<PathBuf> {
    which(tool).map_err(|_| LifetimeError::ToolNotFound { tool: tool.to_string() })
}
