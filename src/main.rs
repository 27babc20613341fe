use std::path::PathBuf;
use std::process;
use clap::Parser;
use log::{info, warn};
use netdiag::{read_hosts_file, DiagError, PingExecutor, PingResult, ProbeConfig, RawOutput};

#[derive(Parser, Debug)]
#[command(name = "netdiag")]
#[command(about = "Network diagnostics CLI tool.")]
#[command(version)]
struct Cli {
    /// Path to newline-separated hosts file.
    hosts_file: PathBuf,

    /// Ping every loaded host, one after another
    #[arg(long)]
    ping: bool,

    /// Packets to send per host
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// Per-packet wait in seconds
    #[arg(short = 'W', long = "timeout", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Wall-clock limit in seconds for each ping invocation
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    run_timeout: Option<u64>,

    /// Print ping results as JSON
    #[arg(long, requires = "ping")]
    json: bool,

    /// Store the effective ping settings as the new defaults
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn probe_config(&self) -> ProbeConfig {
        let mut config = ProbeConfig::load();
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(run_timeout) = self.run_timeout {
            config.run_timeout_secs = run_timeout;
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), DiagError> {
    env_logger::init();

    let cli = Cli::parse();

    let hosts = match read_hosts_file(&cli.hosts_file) {
        Ok(hosts) => hosts,
        Err(e) if e.is_user_facing() => {
            println!("Error: {}", e);
            process::exit(1);
        }
        Err(e) => return Err(e),
    };

    if !cli.json {
        println!("Loaded {} hosts:", hosts.len());
        for host in &hosts {
            println!("- {}", host);
        }
    }

    if !cli.ping && !cli.save_config {
        return Ok(());
    }

    let config = cli.probe_config();
    config.validate()?;

    if cli.save_config {
        match config.save() {
            Ok(path) => info!("Saved ping settings to {}", path.display()),
            Err(e) => warn!("Failed to save config: {}", e),
        }
    }

    if cli.ping {
        ping_hosts(&hosts, &config, cli.json).await?;
    }
    Ok(())
}

async fn ping_hosts(hosts: &[String], config: &ProbeConfig, json: bool) -> Result<(), DiagError> {
    let mut results = Vec::with_capacity(hosts.len());

    for host in hosts {
        let (result, output) = PingExecutor::probe(host, config).await?;
        if !json {
            print_report(&result, &output);
        }
        results.push(result);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        let reachable = results.iter().filter(|r| r.reachable).count();
        println!();
        println!("{}/{} hosts reachable", reachable, results.len());
    }
    Ok(())
}

fn print_report(result: &PingResult, output: &RawOutput) {
    println!();
    if result.reachable {
        println!("{}: reachable", result.host);
    } else {
        println!("{}: unreachable ({})", result.host, result.error.as_deref().unwrap_or("unknown error"));
    }
    for line in output.stdout.lines() {
        println!("    {}", line);
    }
}
