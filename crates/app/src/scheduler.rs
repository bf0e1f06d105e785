//! Daily trigger for the recurring run.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Days, NaiveTime, Utc};
use engine::Engine;
use tokio::sync::watch;

use crate::settings;

/// Time left until the next `hour:minute` UTC strictly after `now`.
fn until_next_run(now: DateTime<Utc>, at: NaiveTime) -> Option<Duration> {
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        today.checked_add_days(Days::new(1))?
    };
    (next - now).to_std().ok()
}

pub async fn run(
    engine: Arc<Engine>,
    config: settings::Scheduler,
    mut shutdown: watch::Receiver<bool>,
) {
    let Some(at) = NaiveTime::from_hms_opt(config.hour, config.minute, 0) else {
        tracing::error!(
            hour = config.hour,
            minute = config.minute,
            "invalid scheduler time, recurring runs disabled"
        );
        return;
    };
    let timeout = Duration::from_secs(config.tick_timeout_secs);
    tracing::info!(%at, "recurring scheduler started");

    loop {
        let Some(wait) = until_next_run(Utc::now(), at) else {
            tracing::error!("cannot compute next recurring run");
            return;
        };
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = shutdown.changed() => {
                tracing::info!("recurring scheduler stopped");
                return;
            }
        }

        let now = Utc::now();
        match tokio::time::timeout(timeout, engine.run_recurring_tick_cancellable(now, &shutdown))
            .await
        {
            Ok(Ok(processed)) => tracing::info!(processed, "recurring run done"),
            Ok(Err(engine::EngineError::Cancelled)) => {
                tracing::info!("recurring run cancelled by shutdown");
                return;
            }
            Ok(Err(err)) => tracing::error!("recurring run failed: {err}"),
            Err(_) => tracing::warn!(?timeout, "recurring run timed out, rolled back"),
        }
    }
}
