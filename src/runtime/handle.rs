use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    core::store::{Saved, StoreError, TripStore},
    trip::{Trip, TripDraft, TripPatch},
    types::{CategoryFilter, SortKey, TripId},
};

use super::events::TripEvent;

/// Failures surfaced through [`TripStoreHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The store rejected the command.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The runtime task has stopped.
    #[error("trip store runtime is not running")]
    ChannelClosed,
}

/// Queue sizes for the runtime task.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pending commands before senders wait.
    pub command_queue_bound: usize,
    /// Events buffered per subscriber before lagging.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable front end to a store owned by a single runtime task.
pub struct TripStoreHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<TripEvent>,
}

impl Clone for TripStoreHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Add {
        draft: TripDraft,
        resp: oneshot::Sender<Result<TripId, RuntimeError>>,
    },
    Edit {
        id: TripId,
        patch: TripPatch,
        resp: oneshot::Sender<Result<bool, RuntimeError>>,
    },
    Delete {
        id: TripId,
        resp: oneshot::Sender<bool>,
    },
    Query {
        filter: CategoryFilter,
        sort: SortKey,
        resp: oneshot::Sender<Vec<Trip>>,
    },
    Get {
        id: TripId,
        resp: oneshot::Sender<Option<Trip>>,
    },
    Select {
        id: TripId,
        resp: oneshot::Sender<Option<Trip>>,
    },
    Selected {
        resp: oneshot::Sender<Option<Trip>>,
    },
    Shutdown {
        resp: oneshot::Sender<TripStore>,
    },
}

/// Moves `store` into a tokio task and returns a handle to it.
///
/// Commands run one at a time, so every slot write finishes before the next
/// command is looked at. Must be called from within a tokio runtime.
pub fn spawn_tripstore(store: TripStore, config: RuntimeConfig) -> TripStoreHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<TripEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            if let Some(resp) = handle_command(cmd, &mut store, &events_tx_loop) {
                let _ = resp.send(store);
                return;
            }
        }
        debug!("trip store runtime stopped, all handles dropped");
    });

    TripStoreHandle { cmd_tx, events_tx }
}

impl TripStoreHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<TripEvent> {
        self.events_tx.subscribe()
    }

    pub async fn add(&self, draft: TripDraft) -> Result<TripId, RuntimeError> {
        self.request(|resp| Command::Add { draft, resp }).await?
    }

    pub async fn edit(&self, id: TripId, patch: TripPatch) -> Result<bool, RuntimeError> {
        self.request(|resp| Command::Edit { id, patch, resp }).await?
    }

    /// Returns whether a trip was removed.
    pub async fn delete(&self, id: TripId) -> Result<bool, RuntimeError> {
        self.request(|resp| Command::Delete { id, resp }).await
    }

    pub async fn query(&self, filter: CategoryFilter, sort: SortKey) -> Result<Vec<Trip>, RuntimeError> {
        self.request(|resp| Command::Query { filter, sort, resp }).await
    }

    pub async fn get(&self, id: TripId) -> Result<Option<Trip>, RuntimeError> {
        self.request(|resp| Command::Get { id, resp }).await
    }

    pub async fn select(&self, id: TripId) -> Result<Option<Trip>, RuntimeError> {
        self.request(|resp| Command::Select { id, resp }).await
    }

    pub async fn selected(&self) -> Result<Option<Trip>, RuntimeError> {
        self.request(|resp| Command::Selected { resp }).await
    }

    /// Stops the runtime task and hands the store back.
    pub async fn shutdown(&self) -> Result<TripStore, RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

// Returns the shutdown responder once the loop should stop.
fn handle_command(
    cmd: Command,
    store: &mut TripStore,
    events_tx: &broadcast::Sender<TripEvent>,
) -> Option<oneshot::Sender<TripStore>> {
    match cmd {
        Command::Add { draft, resp } => {
            let res = store.add(draft).map_err(RuntimeError::from).map(|saved| {
                let id = saved.value;
                publish(events_tx, TripEvent::Added { id }, saved)
            });
            let _ = resp.send(res);
        }
        Command::Edit { id, patch, resp } => {
            let res = store.edit(id, patch).map_err(RuntimeError::from).map(|saved| {
                if saved.value {
                    publish(events_tx, TripEvent::Edited { id }, saved)
                } else {
                    false
                }
            });
            let _ = resp.send(res);
        }
        Command::Delete { id, resp } => {
            let saved = store.delete(id);
            let removed = if saved.value.is_some() {
                let _ = publish(events_tx, TripEvent::Deleted { id }, saved);
                true
            } else {
                false
            };
            let _ = resp.send(removed);
        }
        Command::Query { filter, sort, resp } => {
            let trips = store.view(filter, sort).into_iter().cloned().collect();
            let _ = resp.send(trips);
        }
        Command::Get { id, resp } => {
            let _ = resp.send(store.get(id).cloned());
        }
        Command::Select { id, resp } => {
            let _ = resp.send(store.select(id).cloned());
        }
        Command::Selected { resp } => {
            let _ = resp.send(store.selected().cloned());
        }
        Command::Shutdown { resp } => {
            return Some(resp);
        }
    }

    None
}

fn publish<T>(events_tx: &broadcast::Sender<TripEvent>, event: TripEvent, saved: Saved<T>) -> T {
    let _ = events_tx.send(event);
    if let Some(err) = saved.warning {
        let _ = events_tx.send(TripEvent::PersistFailed {
            message: err.to_string(),
        });
    }
    saved.value
}
