//! fwctl - firewall control for hosted services
//!
//! Command-line front end for a service's firewall on the control-plane API.
//!
//! # Usage
//!
//! ```bash
//! fwctl firewall server 15 status                 # Is the firewall on?
//! fwctl firewall server 15 on                     # Enable it
//! fwctl firewall server 15 rules                  # List inbound/outbound rules
//! fwctl firewall server 15 add --port 443 --proto tcp --comment web
//! fwctl firewall server 15 edit --position 2 --ip 10.0.0.0/8
//! fwctl firewall server 15 del --position 2
//! fwctl --output json firewall cloud-app 7 rules  # Machine-readable output
//! ```
//!
//! # Exit codes
//!
//! - `0`: the request completed, even if the server rejected it
//! - `1`: usage error (help is printed) or the request could not be made

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use fwctl::core::client::HttpFirewallApi;
use fwctl::core::error::ErrorTranslation;
use fwctl::output::{OutputFormat, TerminalPresenter};
use fwctl::{Error, Invocation, RuleFlags, UsageError, config, dispatch};
use std::process::ExitCode;
use tracing::{Level, debug};

shadow_rs::shadow!(build);

const FIREWALL_COMMAND: &str = "firewall";

#[derive(Parser)]
#[command(name = "fwctl")]
#[command(about = "Manage hosted services from the command line", long_about = None)]
#[command(version = build::PKG_VERSION, long_version = build::CLAP_LONG_VERSION)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Control-plane API base URL
    #[arg(long, global = true, env = "FWCTL_API_URL")]
    api_url: Option<String>,

    /// API token
    #[arg(long, global = true, env = "FWCTL_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage a service's firewall
    #[command(
        name = FIREWALL_COMMAND,
        override_usage = "fwctl firewall <server|cloud-app> <ID> <on|off|add|edit|del|status|rules> [OPTIONS]"
    )]
    Firewall {
        /// Product scope, service id and action
        #[arg(value_name = "ARGS", num_args = 0..)]
        args: Vec<String>,

        #[command(flatten)]
        flags: RuleFlags,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Commands::Firewall { args, flags } = cli.command;

    // Validate before touching config, network or stdout
    let invocation = match Invocation::parse(args, flags) {
        Ok(invocation) => invocation,
        Err(e) => return usage_failure(&e),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return fatal(&Error::Io(e)),
    };

    match runtime.block_on(run(&invocation, cli.api_url, cli.token, cli.output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(e)) => usage_failure(&e),
        Err(e) => fatal(&e),
    }
}

async fn run(
    invocation: &Invocation,
    api_url: Option<String>,
    token: Option<String>,
    format: OutputFormat,
) -> fwctl::Result<()> {
    let config = config::load_config().await.with_overrides(api_url, token);
    debug!(api_url = %config.api_url, "Resolved configuration");

    let api = HttpFirewallApi::new(&config)?;
    let mut presenter = TerminalPresenter::stdout(format);
    dispatch(invocation, &api, &mut presenter).await
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // stderr keeps stdout clean for --output json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Prints the firewall command help and fails. The reason is only logged.
fn usage_failure(err: &UsageError) -> ExitCode {
    debug!("Rejected invocation: {err}");
    let mut cli = Cli::command();
    if let Some(firewall) = cli.find_subcommand_mut(FIREWALL_COMMAND) {
        let _ = firewall.print_help();
    }
    ExitCode::FAILURE
}

fn fatal(err: &Error) -> ExitCode {
    let translation = ErrorTranslation::for_error(err);
    eprintln!("Error: {}", translation.user_message);
    for suggestion in &translation.suggestions {
        eprintln!("  - {suggestion}");
    }
    debug!("Underlying error: {err}");
    ExitCode::FAILURE
}
