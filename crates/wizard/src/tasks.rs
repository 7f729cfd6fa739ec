//! Background work started by the wizard.
//!
//! Tasks never touch wizard state. They report back with a
//! [`WizardMessage`] that the wizard applies on its own update path, so
//! there is only ever one writer.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use uuid::Uuid;

use roster_employees::CvFile;

use crate::sync::{RemoteSink, SavePayload, SyncError};

/// Completion reports delivered to the wizard.
#[derive(Debug)]
pub enum WizardMessage {
    /// A CV was read in full and its preview reference derived.
    CvPreviewReady {
        index: usize,
        file: CvFile,
        pdf_url: String,
    },
    /// A CV could not be read; no preview will appear.
    CvReadFailed {
        index: usize,
        file: CvFile,
        error: String,
    },
    /// A remote push finished, successfully or not.
    PushFinished {
        push_id: Uuid,
        result: Result<serde_json::Value, SyncError>,
    },
}

/// `data:` URI carrying the file content; binary-safe and displayable
/// without further lookups.
pub fn preview_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", B64.encode(bytes))
}

/// Read `file` in the background and report its preview reference.
///
/// Not cancellable; the result is delivered even if the user has moved on.
pub fn spawn_cv_read(
    tx: UnboundedSender<WizardMessage>,
    index: usize,
    file: CvFile,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let message = match tokio::fs::read(&file.path).await {
            Ok(bytes) => WizardMessage::CvPreviewReady {
                index,
                pdf_url: preview_uri(file.mime_type(), &bytes),
                file,
            },
            Err(err) => WizardMessage::CvReadFailed {
                index,
                error: err.to_string(),
                file,
            },
        };

        if tx.send(message).is_err() {
            tracing::debug!(index, "wizard gone before cv read completed");
        }
    })
}

/// Push `payload` once in the background and report the outcome.
pub fn spawn_push(
    tx: UnboundedSender<WizardMessage>,
    sink: Arc<dyn RemoteSink>,
    payload: SavePayload,
) -> JoinHandle<()> {
    let push_id = Uuid::now_v7();
    tracing::debug!(%push_id, "pushing wizard state to remote");

    tokio::spawn(async move {
        let result = sink.push(&payload).await;
        if tx.send(WizardMessage::PushFinished { push_id, result }).is_err() {
            tracing::debug!(%push_id, "wizard gone before push completed");
        }
    })
}
