//! System clipboard access via arboard, off the async runtime.

use tokio::sync::mpsc;

use planner_core::prelude::*;

use crate::message::Message;

fn copy_text(text: &str) -> std::result::Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;

    // On Linux the clipboard owner must stay alive until a manager takes the data
    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard.set().wait().text(text.to_string())
    }

    #[cfg(not(target_os = "linux"))]
    {
        clipboard.set_text(text.to_string())
    }
}

pub(super) fn spawn_copy(title: String, text: String, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || copy_text(&text)).await;

        let msg = match result {
            Ok(Ok(())) => {
                debug!("Copied '{}' to clipboard", title);
                Message::Copied { title }
            }
            Ok(Err(e)) => {
                warn!("Clipboard copy failed: {}", e);
                Message::OperationFailed {
                    operation: "Copying to the clipboard".to_string(),
                    error: e.to_string(),
                }
            }
            Err(e) => Message::OperationFailed {
                operation: "Copying to the clipboard".to_string(),
                error: e.to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    });
}
