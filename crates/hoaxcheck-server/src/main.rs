use anyhow::Context;
use clap::Parser;
use hoaxcheck_classifiers::BundleStatus;
use hoaxcheck_server::cli::{Cli, Commands};
use hoaxcheck_server::output::{format_evaluation, user_message};
use hoaxcheck_server::server::run_server;
use hoaxcheck_server::state::AppState;
use std::io::Read;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let state = AppState::from_config_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Classify {
            domain,
            highlight,
            top_n,
            json,
            text,
        } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let top_n = highlight.then(|| top_n.unwrap_or(state.default_top_n));
            let evaluation = state
                .service
                .evaluate_named(&text, &domain, top_n)
                .map_err(|e| anyhow::anyhow!(user_message(&e)))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else {
                print!("{}", format_evaluation(&evaluation));
            }
        }

        Commands::Serve { port, address } => {
            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  hoaxcheck API");
            println!("  Config:  {}", cli.config.display());
            println!("  Bundles: {} ready", state.registry().ready_count());
            println!();
            println!("  POST http://{}/api/evaluate", addr);
            println!();

            run_server(state, addr).await?;
        }

        Commands::Domains => {
            let registry = state.registry();
            for domain in registry.domains() {
                match registry.status(domain) {
                    Some(BundleStatus::Ready(bundle)) => println!(
                        "{:<8} ready        version={} vocabulary={}",
                        domain,
                        bundle.version().unwrap_or("-"),
                        bundle.vocabulary_size()
                    ),
                    Some(BundleStatus::Failed(reason)) => {
                        println!("{:<8} unavailable  {}", domain, reason)
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "hoaxcheck=debug,hoaxcheck_server=debug,hoaxcheck_classifiers=debug,tower_http=debug"
    } else {
        "hoaxcheck=info,hoaxcheck_server=info,hoaxcheck_classifiers=info,tower_http=warn"
    };

    // stderr keeps stdout clean for --json output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
