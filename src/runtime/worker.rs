// Async worker.
// Runs each server request as an independent task and reports the outcome as an event.

use std::future::Future;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::SessionApi;
use crate::error::{Result, ShellError};

use super::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the worker loop until shutdown or until the UI hangs up.
pub async fn run_async_worker(
    api: Arc<dyn SessionApi>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
    timeout: Duration,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == RuntimeCommand::Shutdown {
            tracing::debug!("worker shutting down");
            break;
        }

        let api = Arc::clone(&api);
        let evt_tx = evt_tx.clone();
        tokio::spawn(async move {
            if let Some(evt) = execute(api.as_ref(), cmd, timeout).await {
                let _ = evt_tx.send(evt);
            }
        });
    }
}

/// Perform one command. Requests are independent and unordered.
pub async fn execute(
    api: &dyn SessionApi,
    cmd: RuntimeCommand,
    timeout: Duration,
) -> Option<RuntimeEvent> {
    tracing::debug!(?cmd, "executing");
    let evt = match cmd {
        RuntimeCommand::FetchUser => match with_timeout(timeout, api.get_user()).await {
            Ok(user) => RuntimeEvent::UserLoaded(user),
            Err(err) => RuntimeEvent::UserFailed {
                message: err.to_string(),
            },
        },
        RuntimeCommand::Logout => match with_timeout(timeout, api.user_logout()).await {
            Ok(()) => RuntimeEvent::LoggedOut,
            Err(err) => RuntimeEvent::LogoutFailed {
                message: err.to_string(),
            },
        },
        RuntimeCommand::FetchConnections => {
            match with_timeout(timeout, api.get_connection_list()).await {
                Ok(connections) => RuntimeEvent::ConnectionsLoaded(connections),
                Err(err) => RuntimeEvent::ConnectionsFailed {
                    message: err.to_string(),
                },
            }
        }
        RuntimeCommand::FetchEnvironments => {
            match with_timeout(timeout, api.get_connection_env_list()).await {
                Ok(environments) => RuntimeEvent::EnvironmentsLoaded(environments),
                Err(err) => RuntimeEvent::EnvironmentsFailed {
                    message: err.to_string(),
                },
            }
        }
        RuntimeCommand::Shutdown => return None,
    };
    Some(evt)
}

async fn with_timeout<T>(timeout: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(ShellError::Timeout(timeout)),
    }
}
