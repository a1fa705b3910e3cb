//! CLI entry point for the pingsweep scanner.

use std::num::NonZeroUsize;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pingsweep_core::{ScanRequest, ScanResult};
use pingsweep_discover::config::{load_config, DiscoverConfig, ProbeProfile};
use pingsweep_discover::scanner::PingScanner;
use pingsweep_discover::scheduler::scan_targets;

#[derive(Parser)]
#[command(name = "pingsweep")]
#[command(about = "Find reachable hosts in a CIDR range")]
struct Cli {
    /// Range to sweep (CIDR notation, e.g., 192.168.11.0/24).
    #[arg(short, long, conflicts_with = "all")]
    target: Option<String>,

    /// Sweep every enabled target from the config file.
    #[arg(long)]
    all: bool,

    /// Probe profile: quick, standard, thorough.
    #[arg(short, long)]
    profile: Option<String>,

    /// Simultaneous probes (overrides config).
    #[arg(short = 'n', long)]
    concurrency: Option<usize>,

    /// Raw ping option, repeatable (replaces the profile's flags).
    #[arg(long = "probe-option", allow_hyphen_values = true)]
    probe_options: Vec<String>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Config file prefix (default: pingsweep).
    #[arg(short, long, default_value = "pingsweep")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    apply_overrides(&cli, &mut config)?;

    let scanner = PingScanner::command(&config.ping_path);

    if let Some(target) = cli.target.as_deref() {
        let concurrency = NonZeroUsize::new(config.concurrency)
            .ok_or_else(|| anyhow::anyhow!("--concurrency must be positive"))?;
        let request =
            ScanRequest::new(target, concurrency).with_probe_options(config.options_for(None));

        let result = scanner.scan(&request).await?;
        print!("{}", render_result(&result, cli.json, false)?);
    } else if cli.all {
        let requests = config.enabled_requests()?;
        if requests.is_empty() {
            anyhow::bail!("No enabled targets in config");
        }

        let mut failed = 0usize;
        for (range, result) in scan_targets(&scanner, requests, config.max_concurrent_scans).await
        {
            match result {
                Ok(result) => print!("{}", render_result(&result, cli.json, true)?),
                Err(e) => {
                    eprintln!("{range}: {e}");
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            anyhow::bail!("{failed} target(s) failed");
        }
    } else {
        anyhow::bail!("Specify --target <CIDR> or --all");
    }

    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut DiscoverConfig) -> anyhow::Result<()> {
    if let Some(profile) = cli.profile.as_deref() {
        config.default_profile = profile.parse::<ProbeProfile>()?;
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if !cli.probe_options.is_empty() {
        config.probe_options = Some(cli.probe_options.clone());
    }
    Ok(())
}

/// Text or JSON output for one scan. With `header`, text output is prefixed
/// by the range so several targets can be told apart.
fn render_result(result: &ScanResult, json: bool, header: bool) -> anyhow::Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string(result)?));
    }

    let mut out = String::new();
    if header {
        out.push_str(&format!("# {}\n", result.range));
    }
    if result.is_empty() {
        out.push_str("no alive hosts\n");
    } else {
        for ip in &result.alive {
            out.push_str(ip);
            out.push('\n');
        }
    }
    Ok(out)
}
