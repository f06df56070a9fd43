// Runtime bridge.
// Connects the synchronous UI thread with the Tokio runtime that performs server requests.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use crate::api::{Connection, Environment, LoginUser, SessionApi};
use crate::error::{Result, ShellError};

use super::worker::run_async_worker;

/// Commands sent from the UI to the async worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    FetchUser,
    Logout,
    FetchConnections,
    FetchEnvironments,
    Shutdown,
}

/// Events sent from the async worker to the UI.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// `None` when the server has no session for us.
    UserLoaded(Option<LoginUser>),
    UserFailed { message: String },
    LoggedOut,
    LogoutFailed { message: String },
    ConnectionsLoaded(Vec<Connection>),
    ConnectionsFailed { message: String },
    EnvironmentsLoaded(Vec<Environment>),
    EnvironmentsFailed { message: String },
}

/// Bridge between the UI thread and the async worker.
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread with its own Tokio runtime.
    pub fn new(api: Arc<dyn SessionApi>, timeout: Duration) -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let runtime = Runtime::new()?;

        thread::Builder::new()
            .name("dbdesk-worker".to_string())
            .spawn(move || {
                runtime.block_on(run_async_worker(api, cmd_rx, evt_tx, timeout));
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker.
    pub fn send(&self, cmd: RuntimeCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| ShellError::Other("Worker channel closed".to_string()))
    }

    /// Drain pending events without blocking.
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
