//! MessMate: opens a ledger session and reports on one month.

mod config;

use std::process::ExitCode;

use chrono::Local;
use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::period::Period;
use messmate_core::reconciliation::{fixed_fee_from_bills, full_settlement, market_only_settlement};
use messmate_core::repository::LedgerMode;
use messmate_core::summary::{dashboard, meal_matrix};
use messmate_db::repository::{SurrealGroupRepository, SurrealPersistenceClient};
use messmate_db::{DbError, DbManager, run_migrations};
use messmate_ledger::{RecordRepository, RemoteLedger, SessionLedger, SignedInActor};
use surrealdb::engine::remote::ws::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

type Ledger =
    RemoteLedger<SurrealPersistenceClient<Client>, SignedInActor, SurrealGroupRepository<Client>>;
type Session = SessionLedger<
    SurrealPersistenceClient<Client>,
    SignedInActor,
    SurrealGroupRepository<Client>,
>;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::from_default_env();
    let filter = match "messmate=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting MessMate...");
    match run().await {
        Ok(()) => {
            info!("MessMate stopped.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "MessMate failed");
            ExitCode::FAILURE
        }
    }
}

async fn connect_remote(config: &ServerConfig) -> MessmateResult<Ledger> {
    let manager = DbManager::connect(&config.db)
        .await
        .map_err(DbError::from)?;
    run_migrations(manager.client()).await?;

    let db = manager.client().clone();
    Ok(RemoteLedger::new(
        SurrealPersistenceClient::new(db.clone()),
        SignedInActor(config.actor),
        SurrealGroupRepository::new(db),
    ))
}

async fn run() -> MessmateResult<()> {
    let config = ServerConfig::from_env()?;
    let today = Local::now().date_naive();
    let period = config.period.unwrap_or_else(|| Period::containing(today));

    let remote = match config.ledger.mode {
        LedgerMode::Remote => Some(connect_remote(&config).await?),
        LedgerMode::Guest => None,
    };
    let session = Session::select(&config.ledger, today, remote)?;
    let repo = RecordRepository::open(session).await;
    let snapshot = repo.snapshot();

    let fixed_fee = config
        .fixed_fee
        .unwrap_or_else(|| fixed_fee_from_bills(&snapshot, &period));
    let report = market_only_settlement(&snapshot, &period);
    let sheet = full_settlement(&snapshot, &period, fixed_fee);

    info!(
        %period,
        mode = ?repo.mode(),
        residents = snapshot.residents.len(),
        total_meals = report.total_meals,
        meal_rate = report.meal_rate,
        fixed_fee,
        "Period settled"
    );

    let output = serde_json::json!({
        "dashboard": dashboard(&snapshot, &period),
        "meal_matrix": meal_matrix(&snapshot, &period),
        "monthly_report": report,
        "settlement": sheet,
    });
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| MessmateError::Internal(e.to_string()))?;
    println!("{rendered}");

    Ok(())
}
