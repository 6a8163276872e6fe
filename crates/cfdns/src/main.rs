// # cfdns - Cloudflare DNS record tool
//
// This binary is a THIN integration layer over cfdns-core:
// 1. Parse and validate arguments (no network before this is done)
// 2. Resolve the API token
// 3. Build the Cloudflare provider and the reconciler
// 4. Run one operation and print the result
//
// ## Modes (first match wins)
//
// - `--delete --record-id ID`: delete a record by ID
// - `--search --name NAME`: list matching records
// - default: create or update `--name` to `--ip` (A) or `--target` (CNAME)
//
// ## Environment
//
// - `CLOUDFLARE_API_TOKEN`: API token (after `--token`, before the prompt)
// - `CFDNS_DOMAIN`: root domain of the zone
// - `CLOUDFLARE_ZONE_ID`: zone ID, skips the zone lookup
// - `CFDNS_API_BASE`: API base URL
// - `CFDNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// cfdns --domain example.com --name staging --ip 203.0.113.42 --dry-run
// cfdns --domain example.com --name www --type CNAME --target example.com
// cfdns --domain example.com --search --name staging
// cfdns --domain example.com --delete --record-id 372e67954025e0ba6aaa6d586b9e0b59
// ```

mod report;
mod token;

use anyhow::Result;
use cfdns_core::config::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, validate_domain_name};
use cfdns_core::{ClientConfig, DesiredRecord, Error, Mode, Reconciler, RecordType};
use cfdns_provider_cloudflare::CloudflareProvider;
use clap::Parser;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliExitCode {
    /// Operation completed
    Success = 0,
    /// Provider, network or lookup failure
    Failure = 1,
    /// Invalid arguments or input, reported before any network call
    Usage = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Manage A and CNAME records of a Cloudflare zone
#[derive(Parser, Debug)]
#[command(name = "cfdns", version, about, long_about = None)]
struct Cli {
    /// Record name, relative to the domain (`staging`) or fully qualified
    #[arg(long)]
    name: Option<String>,

    /// Record type
    #[arg(long = "type", value_name = "TYPE", default_value = "A", value_parser = parse_record_type)]
    record_type: RecordType,

    /// IPv4 address for an A record
    #[arg(long)]
    ip: Option<String>,

    /// Target domain for a CNAME record
    #[arg(long)]
    target: Option<String>,

    /// Record ID to delete
    #[arg(long)]
    record_id: Option<String>,

    /// List records matching --name and --type
    #[arg(long)]
    search: bool,

    /// Delete the record given by --record-id
    #[arg(long)]
    delete: bool,

    /// Cloudflare API token (falls back to CLOUDFLARE_API_TOKEN, then a prompt)
    #[arg(long)]
    token: Option<String>,

    /// Show intended changes without applying them
    #[arg(long)]
    dry_run: bool,

    /// Route traffic through the Cloudflare proxy
    #[arg(long)]
    proxied: bool,

    /// Root domain of the zone (e.g. example.com)
    #[arg(long, env = "CFDNS_DOMAIN")]
    domain: String,

    /// Zone ID; skips the zone lookup
    #[arg(long, env = "CLOUDFLARE_ZONE_ID")]
    zone_id: Option<String>,

    /// API base URL
    #[arg(long, env = "CFDNS_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CFDNS_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    verbose: bool,
}

fn parse_record_type(value: &str) -> std::result::Result<RecordType, String> {
    value.parse().map_err(|e: Error| e.to_string())
}

/// The operation selected by the flags, fully validated
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Delete { record_id: String },
    Search { name: String, record_type: RecordType },
    Apply { desired: DesiredRecord },
}

impl Cli {
    /// Build and validate the client configuration
    fn client_config(&self) -> cfdns_core::Result<ClientConfig> {
        let config = ClientConfig::new(self.domain.trim())
            .with_api_base(self.api_base.trim())
            .with_zone_id(self.zone_id.clone())
            .with_timeout_secs(self.timeout_secs);
        config.validate()?;
        Ok(config)
    }

    /// Select the operation: delete, then search, then create/update
    fn command(&self, config: &ClientConfig) -> cfdns_core::Result<Command> {
        if self.delete {
            let record_id = required(self.record_id.as_deref(), "--record-id is required with --delete")?;
            return Ok(Command::Delete { record_id });
        }

        let name = required(self.name.as_deref(), "--name is required")?;
        let name = config.qualify(&name);
        validate_domain_name(&name)?;

        if self.search {
            return Ok(Command::Search {
                name,
                record_type: self.record_type,
            });
        }

        let desired = match self.record_type {
            RecordType::A => {
                if self.target.is_some() {
                    return Err(Error::invalid_input("--target only applies to CNAME records"));
                }
                let ip = required(self.ip.as_deref(), "--ip is required for A records")?;
                DesiredRecord::a(name, &ip, self.proxied)?
            }
            RecordType::Cname => {
                if self.ip.is_some() {
                    return Err(Error::invalid_input("--ip only applies to A records"));
                }
                let target = required(self.target.as_deref(), "--target is required for CNAME records")?;
                DesiredRecord::cname(name, &target, self.proxied)?
            }
        };

        Ok(Command::Apply { desired })
    }

    fn log_level(&self) -> cfdns_core::Result<Level> {
        if self.verbose {
            return Ok(Level::DEBUG);
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => Err(Error::invalid_input(format!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ))),
        }
    }
}

fn required(value: Option<&str>, message: &str) -> cfdns_core::Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_input(message))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            return CliExitCode::Usage.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CliExitCode::Failure.into();
    }

    // All input validation happens here, before the token or the network
    let prepared = cli
        .client_config()
        .and_then(|config| cli.command(&config).map(|command| (config, command)))
        .and_then(|(config, command)| {
            token::resolve(cli.token.as_deref()).map(|token| (config, command, token))
        });

    let (config, command, api_token) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("{}", e);
            return CliExitCode::Usage.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CliExitCode::Failure.into();
        }
    };

    let mode = Mode::from_dry_run(cli.dry_run);
    let result = rt.block_on(run(config, command, api_token, mode));

    match result {
        Ok(output) => {
            print!("{}", output);
            CliExitCode::Success.into()
        }
        Err(e) => {
            eprintln!("{}", describe_failure(&e));
            exit_code_for(&e).into()
        }
    }
}

/// Run one operation and return the rendered report
async fn run(config: ClientConfig, command: Command, api_token: String, mode: Mode) -> Result<String> {
    let provider = CloudflareProvider::new(api_token, &config)?;
    debug!("Provider ready: {:?}", provider);

    let reconciler = Reconciler::new(Box::new(provider), config, mode);

    let output = match command {
        Command::Delete { record_id } => report::delete(&reconciler.delete(&record_id).await?),
        Command::Search { name, record_type } => {
            report::search(&reconciler.search(&name, record_type).await?)
        }
        Command::Apply { desired } => report::reconcile(&reconciler.reconcile(&desired).await?),
    };

    Ok(output)
}

fn exit_code_for(err: &anyhow::Error) -> CliExitCode {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_input_error() => CliExitCode::Usage,
        _ => CliExitCode::Failure,
    }
}

fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<Error>() {
        Some(Error::Network(msg)) => format!("Network error: {}", msg),
        Some(e @ Error::Provider { .. }) | Some(e @ Error::NotFound(_)) => {
            format!("Cloudflare API error: {}", e)
        }
        _ => format!("Error: {:#}", err),
    }
}
