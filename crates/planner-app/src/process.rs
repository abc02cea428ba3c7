//! Message processing: the TEA update loop with action dispatch

use tokio::sync::mpsc;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::services::PlannerBackend;
use crate::state::AppState;

/// Process a message through the TEA update function, following up
/// messages and dispatching actions until the chain ends.
pub fn process_message<B: PlannerBackend>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    ctx: &ActionContext<B>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), ctx);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
