use std::sync::mpsc;
use std::time::Duration;

use engine_logging::engine_trace;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, Generation};

/// Owns at most one pending timer. Scheduling a new one cancels the old one,
/// so only a timer that is never superseded emits `DebounceElapsed`.
pub struct Debouncer {
    runtime: Handle,
    event_tx: mpsc::Sender<EngineEvent>,
    pending: Option<(Generation, CancellationToken)>,
}

impl Debouncer {
    pub fn new(runtime: Handle, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            runtime,
            event_tx,
            pending: None,
        }
    }

    pub fn schedule(&mut self, generation: Generation, delay: Duration) {
        self.cancel();
        let token = CancellationToken::new();
        let timer = token.clone();
        let event_tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            if timer
                .run_until_cancelled(tokio::time::sleep(delay))
                .await
                .is_some()
            {
                let _ = event_tx.send(EngineEvent::DebounceElapsed { generation });
            }
        });
        self.pending = Some((generation, token));
    }

    pub fn cancel(&mut self) {
        if let Some((generation, token)) = self.pending.take() {
            engine_trace!("Cancelling debounce generation={}", generation);
            token.cancel();
        }
    }

    /// Generation of the most recently scheduled timer, if not cancelled.
    pub fn pending_generation(&self) -> Option<Generation> {
        self.pending.as_ref().map(|(generation, _)| *generation)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
