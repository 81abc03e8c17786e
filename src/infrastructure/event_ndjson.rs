use crate::usecase::event::AppEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            match serde_json::to_string(&ev) {
                // NDJSON to stdout.
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, ?ev, "dropping unencodable event"),
            }
        }
    })
}
