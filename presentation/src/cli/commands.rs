//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for infraflow-mesh
#[derive(Parser, Debug)]
#[command(name = "infraflow")]
#[command(author, version, about = "Multi-agent mission orchestration engine")]
#[command(long_about = r#"
InfraFlow Mesh runs a team of reasoning agents over a shared conversation
until they converge on a plan for the submitted mission.

Missions are submitted and observed over HTTP:
  GET  /                      Engine status
  POST /start-mission         {"mission": "..."} -> missionId
  GET  /missions              All missions
  GET  /missions/{id}         Mission snapshot
  POST /missions/{id}/cancel  Stop a running mission

Configuration files are loaded from (in priority order):
1. INFRAFLOW_* environment variables (e.g. INFRAFLOW_ENGINE__MAX_ROUNDS=8)
2. --config <path>        Explicit config file
3. ./infraflow.toml       Project-level config
4. ~/.config/infraflow/config.toml   Global config

Example:
  OPENAI_API_KEY=sk-... infraflow --bind 127.0.0.1:8080 -v
"#)]
pub struct Cli {
    /// Address to listen on (overrides [server].bind)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default tracing directive for the requested verbosity
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
