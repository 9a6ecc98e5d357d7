use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coverwatch::api::server;
use coverwatch::api::types::ApiContext;
use coverwatch::config::{self, AppConfig};
use coverwatch::db::{SupabasePolicies, SupabaseStorage};
use coverwatch::notify::{NagCycle, ResendMailer, DEFAULT_HORIZON_DAYS};
use coverwatch::pipeline::{GeminiClient, IngestionProcessor, ModelGateway};

#[derive(Parser)]
#[command(name = "coverwatch", version, about = "COI intake and expiry notification service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the ingestion webhook server.
    Serve {
        #[arg(long, env = "COVERWATCH_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
    /// Run one expiration scan + notification pass (cron entrypoint).
    NagCycle {
        /// Lookahead horizon in days.
        #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        "{} starting v{}",
        config::SERVICE_NAME,
        config::SERVICE_VERSION
    );

    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Serve { bind } => {
            let gateway = ModelGateway::new(GeminiClient::google(&config.gemini_api_key));
            let documents = SupabaseStorage::new(&config.supabase_url, &config.supabase_key);
            let policies = SupabasePolicies::new(&config.supabase_url, &config.supabase_key);
            let ctx = ApiContext {
                processor: Arc::new(IngestionProcessor::new(gateway, documents, policies)),
            };

            if let Err(e) = server::serve(ctx, bind).await {
                error!(error = %e, "server error");
                return ExitCode::FAILURE;
            }
        }
        Command::NagCycle { days } => {
            let policies = SupabasePolicies::new(&config.supabase_url, &config.supabase_key);
            let mailer = ResendMailer::resend(config.resend_api_key.clone(), &config.mail_from);
            if mailer.is_mock() {
                info!("no RESEND_API_KEY configured, reminders will be logged only");
            }

            let cycle = NagCycle::new(policies, mailer, &config.portal_url, &config.fallback_email);
            let summary = cycle.run(chrono::Utc::now().date_naive(), days).await;
            info!(
                targets = summary.targets,
                sent = summary.sent,
                failed = summary.failed,
                "nag cycle finished"
            );
        }
    }

    ExitCode::SUCCESS
}
