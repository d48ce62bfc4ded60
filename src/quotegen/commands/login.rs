use super::{CmdMessage, CmdResult};
use crate::gate::{AccessGate, Credentials, GateOutcome, SessionStorage};

/// Tries `credentials` against the gate. A mismatch is reported inline, never as an error.
pub fn run(gate: &AccessGate, session: &mut SessionStorage, credentials: &Credentials) -> CmdResult {
    match gate.attempt(session, credentials) {
        GateOutcome::Granted => CmdResult::default().with_message(CmdMessage::success("Signed in")),
        GateOutcome::Denied(message) => CmdResult::default().with_message(CmdMessage::error(message)),
    }
}
