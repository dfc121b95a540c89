//! # configurator demo application
//!
//! A sample CLI tool that shows how an application wires `configurator` in.
//! It exists to demonstrate and manually verify the population layers.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example configurator_demo -- echo
//! cargo run --example configurator_demo -- config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature            | How to exercise it                                                        |
//! |--------------------|---------------------------------------------------------------------------|
//! | Compiled defaults  | `cargo run --example configurator_demo -- echo`                           |
//! | Config file        | `CONFIGURATOR_DEMO_CONFIG=demo.json cargo run --example configurator_demo -- echo` |
//! | Env var override   | `CONFIGURATOR_DEMO_COLOR=red cargo run --example configurator_demo -- echo` |
//! | Nested env var     | `CONFIGURATOR_DEMO_SERVER_PORT=9999 cargo run --example configurator_demo -- echo` |
//! | Flag override      | `cargo run --example configurator_demo -- --server-port 7000 echo`        |
//! | Boolean flag       | `cargo run --example configurator_demo -- --verbose echo`                 |
//! | `config list`      | `cargo run --example configurator_demo -- config list`                    |
//! | `config template`  | `cargo run --example configurator_demo -- config template -o demo.json`   |
//! | Logging            | `RUST_LOG=configurator=debug cargo run --example configurator_demo -- echo` |

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use configurator::{ConfigArgs, Configurable, Configurator};

#[derive(Debug, Default, Configurable)]
struct DemoConfig {
    #[configurator(default = "configurator-demo", file = "name", env = "NAME")]
    name: String,
    #[configurator(default = "false", file = "verbose", env = "VERBOSE")]
    verbose: bool,
    #[configurator(default = "yellow", file = "color", env = "COLOR")]
    color: String,
    #[configurator(nested, file = "server")]
    server: ServerConfig,
}

#[derive(Debug, Default, Configurable)]
struct ServerConfig {
    #[configurator(default = "127.0.0.1", file = "host", env = "SERVER_HOST")]
    host: String,
    #[configurator(default = "8080", file = "port", env = "SERVER_PORT")]
    port: i64,
}

/// Commands read from the positional arguments left over after flag parsing.
#[derive(Parser, Debug)]
#[command(name = "configurator-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the populated configuration.
    Echo,
    /// Inspect the configuration (list, template).
    Config(ConfigArgs),
}

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

fn echo(config: &DemoConfig) {
    let color = ansi_color_code(&config.color);
    if config.verbose {
        println!("{color}[verbose] populated configuration for {:?}{RESET}", config.name);
        println!();
    }

    let entries = [
        ("name", config.name.clone()),
        ("verbose", config.verbose.to_string()),
        ("color", config.color.clone()),
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
    ];
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{color}{key:<width$}{RESET}  {value}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = DemoConfig::default();
    let mut configurator = Configurator::builder()
        .env_prefix("CONFIGURATOR_DEMO_")
        .bin_name("configurator-demo")
        .build();
    configurator.initialize(&mut config);

    let rest = std::iter::once("configurator-demo".to_string())
        .chain(configurator.args().iter().cloned());
    let cli = Cli::parse_from(rest);

    match cli.command {
        Commands::Echo => echo(&config),
        Commands::Config(args) => {
            let action = args.into_action();
            match configurator.handle(&action, &mut config) {
                Ok(result) => println!("{result}"),
                Err(e) => {
                    eprintln!("Config error:\n{e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
