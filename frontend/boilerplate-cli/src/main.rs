mod cli;

use anyhow::Context;
use boilerplate_core::config::{ConfigLoader, ConfigPath};
use boilerplate_core::{logging, Config};
use tracing::{error, info, warn};

fn main() {
    if let Err(error) = run() {
        tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
            error!("{error:#}");
        });
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse_args();
    load_dotenv(&cli)?;

    match cli.command.unwrap_or(cli::Command::Check) {
        cli::Command::Check => {
            let config = load_config(&cli.prefix)?;
            logging::init_from_config(&config.observability.logging)?;
            info!(env = %config.primary.env, "configuration check passed");
            if config.is_production() && !config.observability.new_relic_enabled() {
                warn!("running in production without a New Relic license key");
            }
            println!("{}", summary(&config));
            Ok(())
        }
        cli::Command::Show => {
            let config = load_config(&cli.prefix)?;
            let rendered = serde_json::to_string_pretty(&config.redacted()?)
                .context("failed to render configuration")?;
            println!("{rendered}");
            Ok(())
        }
        cli::Command::Vars => {
            print_vars(&cli.prefix);
            Ok(())
        }
    }
}

fn load_dotenv(cli: &cli::Cli) -> anyhow::Result<()> {
    if cli.no_dotenv {
        return Ok(());
    }
    if let Some(path) = &cli.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load env file '{}'", path.display()))?;
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Ok(())
}

fn load_config(prefix: &str) -> anyhow::Result<Config> {
    let loader = ConfigLoader::with_prefix(prefix);
    let config = tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        let loaded = loader.load_from_env();
        if let Some(stage) = loaded.as_ref().err().and_then(|err| err.stage()) {
            warn!(stage = %stage, "configuration load stopped");
        }
        loaded
    })
    .context("could not load configuration")?;
    Ok(config)
}

fn summary(config: &Config) -> String {
    format!(
        "configuration ok: env={} listen={} database={}:{}/{} redis={} observability={}/{} new_relic={}",
        config.primary.env,
        config.server.bind_address(),
        config.database.host,
        config.database.port,
        config.database.name,
        config.redis.address,
        config.observability.service_name,
        config.observability.logging.level,
        if config.observability.new_relic_enabled() {
            "on"
        } else {
            "off"
        },
    )
}

fn print_vars(prefix: &str) {
    for path in ConfigPath::ALL {
        let requirement = if path.is_derived() {
            "derived"
        } else if path.is_required() {
            "required"
        } else {
            "optional"
        };
        println!(
            "{:<58} {:<26} {requirement}",
            path.env_var(prefix),
            path.kind().to_string()
        );
    }
}
