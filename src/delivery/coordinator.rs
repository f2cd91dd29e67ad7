//! Notification delivery state machine.
//!
//! # States
//! - Attempting: calling the client, attempt counter starts at 0
//! - Delivered: the HA API accepted the notification
//! - AlreadyDelivered: the HA API answered 409, it already has this notification
//! - GaveUp: the last allowed attempt failed, or the run was cancelled
//!
//! # State Transitions
//! ```text
//! Attempting → Delivered:        client returns Ok
//! Attempting → AlreadyDelivered: client returns Conflict (never retried)
//! Attempting → Attempting:       other error and counter < max_retries (pause, then same record)
//! Attempting → GaveUp:           other error and counter == max_retries
//!                                or shutdown signalled during the pause
//! ```
//!
//! At most `max_retries + 1` client calls are made. Failures never escape as errors;
//! they end up in [`DeliveryOutcome::GaveUp`].

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::client::{ClientError, ClientResult, NotificationClient, NotificationResponse};
use crate::delivery::observer::DeliveryObserver;
use crate::delivery::policy::RetryPolicy;
use crate::notification::Notification;

/// Why a delivery run gave up.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Every allowed attempt failed; holds the last failure.
    #[error("retries exhausted after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// Shutdown was signalled while waiting to retry.
    #[error("delivery cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
}

/// Terminal result of a delivery run. `attempts` counts client calls.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered {
        response: NotificationResponse,
        attempts: u32,
    },
    AlreadyDelivered {
        attempts: u32,
    },
    GaveUp {
        error: DeliveryError,
        attempts: u32,
    },
}

impl DeliveryOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            DeliveryOutcome::Delivered { attempts, .. }
            | DeliveryOutcome::AlreadyDelivered { attempts }
            | DeliveryOutcome::GaveUp { attempts, .. } => *attempts,
        }
    }

    /// True when the HA API has the notification, whether from this run or an earlier one.
    pub fn is_delivered(&self) -> bool {
        !matches!(self, DeliveryOutcome::GaveUp { .. })
    }
}

/// Classified result of one client call.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(NotificationResponse),
    Duplicate,
    RetryableFailure(ClientError),
    TerminalError(ClientError),
}

/// One client call within a run. `index` is 0-based.
#[derive(Debug)]
pub struct DeliveryAttempt {
    pub index: u32,
    pub outcome: AttemptOutcome,
}

impl DeliveryAttempt {
    /// Classify `result` given how many retries `policy` still allows after `index`.
    pub fn classify(index: u32, policy: &RetryPolicy, result: ClientResult<NotificationResponse>) -> Self {
        let outcome = match result {
            Ok(response) => AttemptOutcome::Success(response),
            Err(ClientError::Conflict) => AttemptOutcome::Duplicate,
            Err(e) if index < policy.max_retries() => AttemptOutcome::RetryableFailure(e),
            Err(e) => AttemptOutcome::TerminalError(e),
        };
        Self { index, outcome }
    }

    /// Client calls made once this attempt has run.
    pub fn attempts(&self) -> u32 {
        self.index.saturating_add(1)
    }
}

/// Drives one notification to a terminal outcome.
pub struct DeliveryCoordinator<O> {
    policy: RetryPolicy,
    observer: O,
}

impl<O: DeliveryObserver> DeliveryCoordinator<O> {
    pub fn new(policy: RetryPolicy, observer: O) -> Self {
        Self { policy, observer }
    }

    /// Deliver `record`, retrying on failure. The same record is sent on every attempt.
    pub async fn deliver<C: NotificationClient>(&self, record: &Notification, client: &C) -> DeliveryOutcome {
        self.run(record, client, None).await
    }

    /// Like [`deliver`](Self::deliver), but a message on `shutdown` during a retry pause
    /// ends the run with [`DeliveryError::Cancelled`].
    pub async fn deliver_until<C: NotificationClient>(
        &self,
        record: &Notification,
        client: &C,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> DeliveryOutcome {
        self.run(record, client, Some(shutdown)).await
    }

    async fn run<C: NotificationClient>(
        &self,
        record: &Notification,
        client: &C,
        mut shutdown: Option<&mut broadcast::Receiver<()>>,
    ) -> DeliveryOutcome {
        self.observer.sending(record);

        let mut index = 0u32;
        loop {
            let result = client.create_notification(record).await;
            let attempt = DeliveryAttempt::classify(index, &self.policy, result);
            let attempts = attempt.attempts();

            match attempt.outcome {
                AttemptOutcome::Success(response) => {
                    self.observer.received_response(&response);
                    return DeliveryOutcome::Delivered { response, attempts };
                }
                AttemptOutcome::Duplicate => {
                    self.observer.already_delivered();
                    return DeliveryOutcome::AlreadyDelivered { attempts };
                }
                AttemptOutcome::TerminalError(source) => {
                    let error = DeliveryError::Exhausted { attempts, source };
                    self.observer.gave_up(&error);
                    return DeliveryOutcome::GaveUp { error, attempts };
                }
                AttemptOutcome::RetryableFailure(e) => {
                    index += 1;
                    self.observer.retrying(index, &e);

                    let cancelled = pause(self.policy.retry_interval(), shutdown.as_deref_mut()).await;
                    if cancelled {
                        let error = DeliveryError::Cancelled { attempts };
                        self.observer.gave_up(&error);
                        return DeliveryOutcome::GaveUp { error, attempts };
                    }
                }
            }
        }
    }
}

/// Wait `interval`. Returns true if `shutdown` fired first.
async fn pause(interval: Duration, shutdown: Option<&mut broadcast::Receiver<()>>) -> bool {
    if interval.is_zero() {
        return false;
    }

    let Some(shutdown) = shutdown else {
        tokio::time::sleep(interval).await;
        return false;
    };

    let sleep = tokio::time::sleep(interval);
    tokio::pin!(sleep);
    tokio::select! {
        _ = &mut sleep => false,
        res = shutdown.recv() => match res {
            // Sender gone without a signal: nobody can cancel us any more.
            Err(RecvError::Closed) => {
                sleep.await;
                false
            }
            Ok(()) | Err(RecvError::Lagged(_)) => true,
        },
    }
}
