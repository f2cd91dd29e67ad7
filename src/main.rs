//! ha-notify
//!
//! Invoked by the failure detector with the name of a host that stopped. Sends one
//! host-failure notification to the HA control plane so it can evacuate the host.
//!
//! # Flow
//!
//! ```text
//!   argv ──▶ cli ──▶ config ──▶ logging ──▶ notification::build ──▶ DeliveryCoordinator
//!                                                                       │      ▲
//!                                                                       ▼      │ retry after
//!                                                                    HaClient  │ fixed pause
//!                                                                  (Keystone + │
//!                                                                    HA API) ──┘
//! ```
//!
//! # Exit Codes
//! - 0: delivered, already delivered, or gave up (failures are reported through logs)
//! - 1: wrong arguments, or the config file cannot be loaded

use std::process::ExitCode;

use chrono::Utc;

use ha_notify::cli::{self, Invocation};
use ha_notify::client::HaClient;
use ha_notify::config::loader::{default_config_path, load_config};
use ha_notify::delivery::{DeliveryCoordinator, DeliveryOutcome, TracingObserver};
use ha_notify::lifecycle::{spawn_signal_listener, Shutdown};
use ha_notify::notification;
use ha_notify::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let hostname = match cli::parse_args(std::env::args_os()) {
        Invocation::Notify(hostname) => hostname,
        Invocation::Usage => {
            println!("{}", cli::USAGE);
            return ExitCode::from(1);
        }
    };

    let config_path = default_config_path();
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ha-notify: {}", e);
            return ExitCode::from(1);
        }
    };

    let _log_guard = match init_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("ha-notify: {}", e);
            return ExitCode::from(1);
        }
    };

    tracing::info!(
        config = %config_path.display(),
        hostname = %hostname,
        max_retries = config.api.api_retry_max,
        retry_interval_secs = config.api.api_retry_interval,
        "ha-notify v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let record = notification::build(&hostname, Utc::now());

    let client = match HaClient::new(&config.api) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create HA client");
            return ExitCode::SUCCESS;
        }
    };

    let shutdown = Shutdown::new();
    let mut shutdown_rx = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    let coordinator = DeliveryCoordinator::new(config.api.retry_policy(), TracingObserver);
    let outcome = coordinator.deliver_until(&record, &client, &mut shutdown_rx).await;

    match &outcome {
        DeliveryOutcome::Delivered { attempts, .. } => {
            tracing::info!(attempts, "Notification delivered");
        }
        DeliveryOutcome::AlreadyDelivered { attempts } => {
            tracing::info!(attempts, "Notification was already delivered");
        }
        DeliveryOutcome::GaveUp { attempts, .. } => {
            tracing::error!(attempts, hostname = %hostname, "Notification not delivered");
        }
    }

    ExitCode::SUCCESS
}
