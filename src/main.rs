use clap::Parser;
use dropdown_migrate::cli::commands::{cmd_classify, cmd_compare, cmd_migrate};
use dropdown_migrate::cli::config::{Cli, Commands, build_migrate_settings, load_config, log_filter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(cli.verbose).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Migrate {
            input,
            store,
            variant,
            dry_run,
            report,
            audit_log,
        } => {
            let settings = build_migrate_settings(
                &input,
                store.as_deref(),
                variant.as_deref(),
                dry_run,
                report.as_deref(),
                audit_log.as_deref(),
                &config,
            )?;
            let all_succeeded = cmd_migrate(&settings)?;
            if !all_succeeded {
                std::process::exit(1);
            }
        }
        Commands::Classify {
            key,
            component,
            screen,
            variant,
        } => {
            cmd_classify(&key, &component, &screen, variant.as_deref(), &config)?;
        }
        Commands::Compare { input } => {
            cmd_compare(&input, &config)?;
        }
    }

    Ok(())
}
