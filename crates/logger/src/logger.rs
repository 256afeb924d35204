// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub trait EventLogging: Clone + Send + 'static {
    fn log(&self, logger_name: &str);
}

/// Logs every event published on a broadcast channel until the channel
/// closes or the logger is dropped.
pub struct SimpleLogger {
    name: String,
    handle: JoinHandle<()>,
}

impl SimpleLogger {
    pub fn attach<E: EventLogging>(name: &str, mut events: broadcast::Receiver<E>) -> Self {
        let logger_name = name.to_owned();
        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => event.log(&logger_name),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(me = %logger_name, skipped, "Logger fell behind")
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        info!(node = %name, "READY!");
        Self {
            name: name.to_owned(),
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for SimpleLogger {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    struct Recorded {
        msg: String,
        sink: Arc<Mutex<Vec<String>>>,
    }

    impl EventLogging for Recorded {
        fn log(&self, logger_name: &str) {
            self.sink
                .lock()
                .unwrap()
                .push(format!("{logger_name}: {}", self.msg));
        }
    }

    #[tokio::test]
    async fn test_logs_until_closed() {
        let sink = Arc::new(Mutex::new(vec![]));
        let (tx, rx) = broadcast::channel(8);
        let logger = SimpleLogger::attach("market", rx);
        assert_eq!(logger.name(), "market");

        for msg in ["one", "two"] {
            tx.send(Recorded {
                msg: msg.to_string(),
                sink: sink.clone(),
            })
            .unwrap();
        }
        drop(tx);

        for _ in 0..50 {
            if !logger.is_running() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(!logger.is_running());
        assert_eq!(
            *sink.lock().unwrap(),
            vec!["market: one".to_string(), "market: two".to_string()]
        );
    }
}
