//! fabci CLI entry point
//!
//! Usage:
//!   fabci run -- <command>...   Run a CI step with streamed output
//!   fabci providers             Show the provider test matrix
//!   fabci fixtures              Show harness fixture parameters
//!   fabci node-name <h> <if>    Format a host-interface identifier
//!   fabci config                Show resolved site configuration

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fabci::cli::{
    commands::{ConfigArgs, FixturesArgs, NodeNameArgs, OutputFormat, ProvidersArgs, RunArgs},
    Cli, Commands,
};
use fabci::cluster::{node_name, site_node_names};
use fabci::config::load_config;
use fabci::error::CiError;
use fabci::executor::{run_command, ExecOptions};
use fabci::fixtures::{MemoryType, MESSAGE_RANGES};
use fabci::providers::{DISABLED_PROVIDERS, ENABLED_PROVIDERS, PROVIDERS};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so streamed child output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CiError::CommandFailed { exit_code, .. }) => {
            // Abort the whole run the same way the step failed
            println!("exiting with {}", exit_code);
            ExitCode::from(u8::try_from(exit_code).unwrap_or(1))
        }
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CiError> {
    match cli.command {
        Commands::Run(args) => run_step(args, cli.verbose).await,
        Commands::Providers(args) => show_providers(args),
        Commands::Fixtures(args) => show_fixtures(args),
        Commands::NodeName(args) => show_node_name(args),
        Commands::Config(args) => show_config(args, cli.config.as_deref()),
    }
}

/// Run a single CI step, streaming its stdout and propagating failure
async fn run_step(args: RunArgs, verbose: bool) -> Result<(), CiError> {
    let command_str = args.command.join(" ");

    let options = ExecOptions {
        working_dir: args.cwd.as_ref().map(Into::into),
        env: args.env_as_map(),
        echo: !args.no_echo,
    };
    if verbose {
        eprintln!("{}: {}", "step".cyan(), command_str);
    }

    let result = run_command(&args.command, &options).await?;

    if verbose && result.success {
        eprintln!(
            "{}: completed in {}ms",
            "success".green(),
            result.duration.as_millis()
        );
    }

    result.into_step_result(command_str).map(|_| ())
}

/// Print the provider matrix and enabled/disabled core lists
fn show_providers(args: ProvidersArgs) -> Result<(), CiError> {
    if args.enabled || args.disabled {
        let cores = if args.enabled {
            ENABLED_PROVIDERS
        } else {
            DISABLED_PROVIDERS
        };
        match args.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&cores)?);
            }
            OutputFormat::Plain => {
                for core in cores {
                    println!("{}", core);
                }
            }
            OutputFormat::Table => {
                let label = if args.enabled { "Enabled" } else { "Disabled" };
                println!("{}:", label.cyan());
                for core in cores {
                    println!("  {}", core.green());
                }
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "matrix": PROVIDERS,
                "enabled": ENABLED_PROVIDERS,
                "disabled": DISABLED_PROVIDERS,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            for prov in PROVIDERS {
                println!("{}", prov);
            }
        }
        OutputFormat::Table => {
            println!("{}:", "Test Matrix".cyan());
            for prov in PROVIDERS {
                match prov.util {
                    Some(util) => println!("  {} ({} layer)", prov.name().green(), util),
                    None => println!("  {}", prov.name().green()),
                }
            }
            println!();
            println!("{}: {}", "Enabled".cyan(), ENABLED_PROVIDERS.join(", "));
            println!("{}: {}", "Disabled".cyan(), DISABLED_PROVIDERS.join(", "));
        }
    }

    Ok(())
}

/// Print the fixture parameter lists the harness fans out over
fn show_fixtures(args: FixturesArgs) -> Result<(), CiError> {
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "memory_types": MemoryType::ALL,
                "message_sizes": MESSAGE_RANGES
                    .iter()
                    .map(|r| r.spec())
                    .collect::<Vec<_>>(),
            }))?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            for mem in MemoryType::ALL {
                println!("{}", mem);
            }
            for range in MESSAGE_RANGES {
                println!("{}", range);
            }
        }
        OutputFormat::Table => {
            println!("{}:", "Memory Types".cyan());
            for mem in MemoryType::ALL {
                let note = if mem.uses_device() { " (cuda)" } else { "" };
                println!("  {}{}", mem.as_str().green(), note);
            }
            println!();
            println!("{}:", "Message Sizes".cyan());
            for range in MESSAGE_RANGES {
                println!("  {}  ({} sizes)", range.spec().green(), range.len());
            }
        }
    }

    Ok(())
}

/// Print the composite node identifier for a host/interface pair
fn show_node_name(args: NodeNameArgs) -> Result<(), CiError> {
    println!("{}", node_name(&args.host, &args.interface));
    Ok(())
}

/// Print the resolved site configuration
fn show_config(args: ConfigArgs, config_path: Option<&str>) -> Result<(), CiError> {
    let mut config = load_config(config_path).map_err(|e| CiError::Config(format!("{:#}", e)))?;
    if !args.raw {
        config.paths = config.paths.expanded();
    }

    match args.format {
        OutputFormat::Json | OutputFormat::Plain => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Table => {
            println!("{}: {}", "Install dir".cyan(), config.paths.install_dir);
            println!("{}: {}", "Log dir".cyan(), config.paths.log_dir);
            println!(
                "{}: {}",
                "Echo commands".cyan(),
                config.defaults.echo_commands
            );
            println!();
            println!("{}:", "Nodes".cyan());
            let names = site_node_names(&config);
            if names.is_empty() {
                println!("  None configured");
            } else {
                for name in names {
                    println!("  {}", name.green());
                }
            }
        }
    }

    Ok(())
}
