use crate::models::{DecodeReport, SnippetSource};
use flume::{Receiver, TryRecvError};
use std::thread;
use tokio::runtime::Runtime;

#[derive(Debug)]
pub enum LoadMessage {
    Loaded(DecodeReport),
    Failed(String),
}

/// Starts loading `source` on a background thread and returns the channel the
/// result will arrive on. Exactly one message is sent.
pub fn spawn_load(source: SnippetSource) -> Receiver<LoadMessage> {
    let (sender, receiver) = flume::bounded(1);

    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                let _ = sender.send(LoadMessage::Failed(format!("Runtime error: {}", e)));
                return;
            }
        };

        let message = match rt.block_on(source.load()) {
            Ok(report) => LoadMessage::Loaded(report),
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "snippet load failed");
                LoadMessage::Failed(format!("{:#}", e))
            }
        };
        let _ = sender.send(message);
    });

    receiver
}

/// Non-blocking check for the load result
pub fn poll(receiver: &Receiver<LoadMessage>) -> Option<LoadMessage> {
    match receiver.try_recv() {
        Ok(message) => Some(message),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(LoadMessage::Failed(
            "Snippet loader stopped unexpectedly".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(receiver: &Receiver<LoadMessage>) -> LoadMessage {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(message) = poll(receiver) {
                return message;
            }
            assert!(Instant::now() < deadline, "loader did not answer in time");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn load_failure_is_reported_on_the_channel() {
        let receiver = spawn_load(SnippetSource::parse("/no/such/snippets.json"));
        assert!(matches!(wait_for(&receiver), LoadMessage::Failed(_)));
    }

    #[test]
    fn loaded_report_is_delivered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"[{"id": "1", "title": "Git rebase"}]"#).unwrap();

        let receiver = spawn_load(SnippetSource::File(path));
        match wait_for(&receiver) {
            LoadMessage::Loaded(report) => assert_eq!(report.collection.len(), 1),
            LoadMessage::Failed(e) => panic!("unexpected failure: {}", e),
        }
    }
}
