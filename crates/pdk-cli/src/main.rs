use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod commands;

#[derive(Parser)]
#[command(name = "pdk")]
#[command(about = "Pattern desk: travel fares and stock price notifications", long_about = None)]
struct Cli {
    /// Layered YAML config paths in merge order (base -> overrides).
    /// Falls back to $PDK_CONFIG, then to built-in defaults.
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive travel cost calculator (prompts on stdin)
    Fare,

    /// Non-interactive travel cost for one trip
    Quote {
        /// Transport mode key (plane | train | bus)
        #[arg(long)]
        mode: String,

        /// Distance in kilometres (decimal)
        #[arg(long)]
        distance: String,

        /// Number of passengers
        #[arg(long)]
        passengers: String,

        /// Service class; only the exact word "business" is business class
        #[arg(long = "class", default_value = "economy")]
        service_class: String,

        /// Apply the discount
        #[arg(long, default_value_t = false)]
        discount: bool,
    },

    /// Run the scripted stock exchange session
    StockDemo {
        /// Pause between price updates in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = pdk_config::load_layered_yaml(&refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Fare => {
            let cfg = commands::load_desk_config(&cli.config_paths)?;
            info!("fare session started");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::fare::run_interactive(&mut stdin.lock(), &mut stdout.lock(), &cfg)?;
        }

        Commands::Quote {
            mode,
            distance,
            passengers,
            service_class,
            discount,
        } => {
            let cfg = commands::load_desk_config(&cli.config_paths)?;
            let line = commands::fare::quote(
                &cfg,
                &mode,
                &distance,
                &passengers,
                &service_class,
                discount,
            )?;
            println!("{line}");
        }

        Commands::StockDemo { delay_ms } => {
            let cfg = commands::load_desk_config(&cli.config_paths)?;
            let delay = delay_ms.unwrap_or(cfg.demo.step_delay_ms);
            info!(delay_ms = delay, "stock demo started");
            commands::stock_demo::run(&cfg, std::time::Duration::from_millis(delay)).await;
        }
    }

    Ok(())
}
