//! Status update sweeper
//!
//! Periodic background job advancing event lifecycle state based on
//! wall-clock time: published events past their end date become completed,
//! draft events whose window has opened become published. Both transitions
//! are bulk, idempotent, and never touch cancelled events.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::SweeperConfig;
use crate::database::EventRepository;
use crate::models::event::EventSummary;
use crate::utils::errors::Result;

/// Outcome of one sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub timestamp: DateTime<Utc>,
    pub events_completed: u64,
    pub events_published: u64,
    pub total_updated: u64,
}

/// Dry-run view of what the next sweep would change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPreview {
    pub expired_published: usize,
    pub draft_ready_to_publish: usize,
    pub details: SweepPreviewDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPreviewDetails {
    pub expired_published: Vec<EventSummary>,
    pub draft_ready_to_publish: Vec<EventSummary>,
}

#[derive(Debug)]
pub struct StatusSweeper {
    events: EventRepository,
    interval: Duration,
    run_on_startup: bool,
}

impl StatusSweeper {
    pub fn new(events: EventRepository, config: &SweeperConfig) -> Self {
        Self {
            events,
            interval: Duration::from_secs(config.interval_seconds),
            run_on_startup: config.run_on_startup,
        }
    }

    /// Perform one sweep synchronously and return the summary.
    ///
    /// Complete-then-publish ordering keeps an already-ended draft event
    /// from being published and completed in the same sweep.
    pub async fn run_once(&self) -> Result<SweepSummary> {
        let now = Utc::now();

        let events_completed = self.events.complete_expired(now).await?;
        let events_published = self.events.publish_due(now).await?;

        let summary = SweepSummary {
            timestamp: now,
            events_completed,
            events_published,
            total_updated: events_completed + events_published,
        };

        crate::utils::logging::log_sweep_summary(events_completed, events_published);
        Ok(summary)
    }

    /// Report the events the next sweep would update, without updating them.
    pub async fn preview(&self) -> Result<SweepPreview> {
        let now = Utc::now();

        let expired = self.events.find_expired_published(now).await?;
        let ready = self.events.find_draft_ready(now).await?;

        Ok(SweepPreview {
            expired_published: expired.len(),
            draft_ready_to_publish: ready.len(),
            details: SweepPreviewDetails {
                expired_published: expired,
                draft_ready_to_publish: ready,
            },
        })
    }

    /// Spawn the periodic sweep loop on the current runtime.
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if self.run_on_startup {
                info!("Running startup status sweep");
                if let Err(e) = self.run_once().await {
                    error!(error = %e, "Startup status sweep failed");
                }
            }

            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately; the startup run above covers it.
            interval.tick().await;

            loop {
                interval.tick().await;
                match self.run_once().await {
                    Ok(summary) if summary.total_updated > 0 => {
                        info!(
                            events_completed = summary.events_completed,
                            events_published = summary.events_published,
                            "Scheduled status sweep updated events"
                        );
                    }
                    Ok(_) => {}
                    Err(e) => {
                        // Transient failures are retried on the next tick.
                        error!(error = %e, "Scheduled status sweep failed");
                    }
                }
            }
        })
    }
}
