use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_warn};

use crate::debounce::Debouncer;
use crate::fetch::{FetchSettings, NewsClient, ReqwestNewsClient};
use crate::{EngineEvent, FetchError, Generation};

enum EngineCommand {
    Schedule {
        generation: Generation,
        delay: Duration,
    },
    CancelPending,
    Search {
        generation: Generation,
        query: String,
    },
}

/// Handle to the background IO thread.
///
/// In-flight searches are never aborted; every completion carries its
/// generation so the caller can drop stale ones.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = ReqwestNewsClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn NewsClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut debouncer = Debouncer::new(runtime.handle().clone(), event_tx.clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Schedule { generation, delay } => {
                        debouncer.schedule(generation, delay);
                    }
                    EngineCommand::CancelPending => debouncer.cancel(),
                    EngineCommand::Search { generation, query } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_search(client.as_ref(), generation, &query, event_tx).await;
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn schedule_fetch(&self, generation: Generation, delay: Duration) {
        self.send(EngineCommand::Schedule { generation, delay });
    }

    pub fn cancel_pending(&self) {
        self.send(EngineCommand::CancelPending);
    }

    pub fn search(&self, generation: Generation, query: impl Into<String>) {
        self.send(EngineCommand::Search {
            generation,
            query: query.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn run_search(
    client: &dyn NewsClient,
    generation: Generation,
    query: &str,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = client.search(query).await;
    if let Err(err) = &result {
        engine_warn!("Search generation={} failed: {}", generation, err.kind);
    }
    let _ = event_tx.send(EngineEvent::SearchCompleted { generation, result });
}
