use std::sync::Arc;
use tokio::sync::watch;

/// Process-wide "keep running" flag.
///
/// Cloned into the input loop and every emitter run. Once cleared it stays
/// cleared.
#[derive(Clone, Debug)]
pub struct Liveness {
    tx: Arc<watch::Sender<bool>>,
}

impl Liveness {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_alive(&self) -> bool {
        *self.tx.borrow()
    }

    /// Begin shutdown. Idempotent.
    pub fn shutdown(&self) {
        self.tx.send_replace(false);
    }

    /// Resolves once shutdown has begun.
    pub async fn stopped(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|alive| !*alive).await;
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
