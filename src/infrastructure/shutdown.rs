use tokio::sync::watch;

/// Cancels every [`Shutdown`] handle cloned from the same channel.
pub struct ShutdownTrigger {
    sender: watch::Sender<Option<String>>,
}

/// Cloneable cancellation signal carrying the shutdown reason.
#[derive(Clone)]
pub struct Shutdown {
    receiver: watch::Receiver<Option<String>>,
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (sender, receiver) = watch::channel(None);

    (ShutdownTrigger { sender }, Shutdown { receiver })
}

impl ShutdownTrigger {
    pub fn cancel(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!("Shutdown requested: {}", reason);
        self.sender.send_replace(Some(reason));
    }

    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Shutdown {
    pub fn reason(&self) -> Option<String> {
        self.receiver.borrow().clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver.borrow().is_some()
    }

    /// Resolves once cancellation is requested. A dropped trigger counts as cancellation.
    pub async fn cancelled(&self) -> String {
        let mut receiver = self.receiver.clone();

        let reason = match receiver.wait_for(|reason| reason.is_some()).await {
            Ok(reason) => reason.clone().unwrap_or_default(),
            Err(_) => "shutdown trigger dropped".to_string(),
        };

        reason
    }
}
