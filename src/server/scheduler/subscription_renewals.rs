use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{renewal::RenewalService, tradesafe::client::TradeSafeClient},
};

/// Starts the subscription renewal scheduler
///
/// On every tick, active subscriptions whose next delivery date has passed are turned
/// into orders and rescheduled. A failed run is logged and retried on the next tick.
///
/// # Arguments
/// - `db`: Database connection
/// - `tradesafe`: Client used to open a payment transaction for each renewal order
/// - `schedule`: Six-field cron expression, seconds first
pub async fn start_scheduler(
    db: DatabaseConnection,
    tradesafe: TradeSafeClient,
    schedule: &str,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_tradesafe = tradesafe.clone();

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let db = job_db.clone();
        let tradesafe = job_tradesafe.clone();

        Box::pin(async move {
            if let Err(e) = process_renewals(&db, &tradesafe).await {
                tracing::error!("Error processing subscription renewals: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Subscription renewal scheduler started ({})", schedule);

    Ok(())
}

async fn process_renewals(
    db: &DatabaseConnection,
    tradesafe: &TradeSafeClient,
) -> Result<(), AppError> {
    let summary = RenewalService::new(db, tradesafe)
        .renew_due(Utc::now())
        .await?;

    if summary.renewed > 0 || summary.skipped > 0 {
        tracing::info!(
            "Subscription renewals: {} renewed, {} skipped",
            summary.renewed,
            summary.skipped
        );
    } else {
        tracing::debug!("No subscriptions due for renewal");
    }

    Ok(())
}
