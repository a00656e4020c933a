//! Chat session state machine
//!
//! The session is either `Idle` or `Busy` with exactly one outstanding
//! request. Submissions are guarded: blank text or a submission while
//! busy is a no-op with no state change and no request. The pending kind
//! is carried in the `Busy` state itself, so a second concurrent
//! submission is unrepresentable rather than merely checked.

use crate::message::{Message, Transcript};
use crate::normalizer::NormalizedReply;

/// Fixed reply appended when a prompt request fails
pub const CHAT_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Fixed reply appended when an instructions request fails
pub const INSTRUCTIONS_ERROR_MESSAGE: &str = "Failed to update instructions. Please try again.";

/// Normalizer fallback for instructions replies without content
pub const INSTRUCTIONS_UPDATED_FALLBACK: &str = "Instructions updated successfully";

/// Which call is outstanding while the session is busy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Prompt,
    Instructions,
}

/// Submission state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy(Pending),
}

/// In-memory state for one chat session
///
/// Owns the transcript, the instructions draft, and the panel visibility
/// flag. Scoped to a single process; nothing is persisted.
#[derive(Debug)]
pub struct ChatSession {
    transcript: Transcript,
    instructions: String,
    show_instructions: bool,
    phase: Phase,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            instructions: String::new(),
            show_instructions: false,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy(_))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn show_instructions(&self) -> bool {
        self.show_instructions
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Replace the instructions draft text.
    pub fn set_instructions(&mut self, text: impl Into<String>) {
        self.instructions = text.into();
    }

    /// Submit a prompt.
    ///
    /// Only fires when idle and the input is non-blank: appends a user
    /// message with the trimmed content, enters the busy state, and
    /// returns the text to dispatch. Otherwise a no-op returning `None`.
    pub fn submit_prompt(&mut self, input: &str) -> Option<String> {
        if self.is_busy() {
            tracing::debug!("Prompt submission ignored while busy");
            return None;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let prompt = trimmed.to_string();
        self.transcript.push(Message::user(prompt.clone()));
        self.phase = Phase::Busy(Pending::Prompt);
        Some(prompt)
    }

    /// Submit the instructions draft.
    ///
    /// Only fires when idle and the draft is non-blank: enters the busy
    /// state and returns the trimmed text to dispatch. No message is
    /// appended until the call resolves.
    pub fn submit_instructions(&mut self) -> Option<String> {
        if self.is_busy() {
            tracing::debug!("Instructions submission ignored while busy");
            return None;
        }
        let trimmed = self.instructions.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.phase = Phase::Busy(Pending::Instructions);
        Some(trimmed.to_string())
    }

    /// Resolve the outstanding request with a normalized reply.
    ///
    /// Appends an assistant message with the reply's content and tools
    /// and returns to idle. A resolved instructions call additionally
    /// clears the draft and hides the panel.
    pub fn complete(&mut self, reply: NormalizedReply) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Busy(pending) => {
                let message = match reply.tools {
                    Some(tools) if !tools.is_empty() => {
                        Message::assistant_with_tools(reply.content, tools)
                    }
                    _ => Message::assistant(reply.content),
                };
                self.transcript.push(message);

                if pending == Pending::Instructions {
                    self.instructions.clear();
                    self.show_instructions = false;
                }
            }
            Phase::Idle => {
                tracing::warn!("complete() called while idle; ignoring");
            }
        }
    }

    /// Resolve the outstanding request as failed.
    ///
    /// Appends the fixed apology for the pending kind and returns to
    /// idle. The instructions draft and panel are left untouched so the
    /// user can retry.
    pub fn fail(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Busy(Pending::Prompt) => {
                self.transcript.push(Message::assistant(CHAT_ERROR_MESSAGE));
            }
            Phase::Busy(Pending::Instructions) => {
                self.transcript
                    .push(Message::assistant(INSTRUCTIONS_ERROR_MESSAGE));
            }
            Phase::Idle => {
                tracing::warn!("fail() called while idle; ignoring");
            }
        }
    }

    /// Toggle the instructions panel; a no-op while busy.
    ///
    /// Returns the visibility after the call.
    pub fn toggle_instructions(&mut self) -> bool {
        if self.is_busy() {
            return self.show_instructions;
        }
        self.show_instructions = !self.show_instructions;
        self.show_instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Role, ToolUse};
    use crate::normalizer::normalize;
    use serde_json::json;

    fn reply(content: &str) -> NormalizedReply {
        NormalizedReply {
            content: content.to_string(),
            tools: None,
        }
    }

    #[test]
    fn test_submit_prompt_appends_user_message_before_dispatch() {
        let mut session = ChatSession::new();
        let sent = session.submit_prompt("  what is 2+2?  ");

        assert_eq!(sent, Some("what is 2+2?".to_string()));
        assert_eq!(session.transcript().len(), 1);
        let message = session.transcript().last().unwrap();
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "what is 2+2?");
        assert_eq!(session.phase(), Phase::Busy(Pending::Prompt));
    }

    #[test]
    fn test_submit_blank_prompt_is_noop() {
        let mut session = ChatSession::new();
        assert_eq!(session.submit_prompt(""), None);
        assert_eq!(session.submit_prompt("   \t "), None);
        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_submit_while_busy_is_noop() {
        let mut session = ChatSession::new();
        session.submit_prompt("first").unwrap();

        assert_eq!(session.submit_prompt("second"), None);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.phase(), Phase::Busy(Pending::Prompt));
    }

    #[test]
    fn test_complete_prompt_appends_assistant_and_returns_idle() {
        let mut session = ChatSession::new();
        session.submit_prompt("2+2").unwrap();
        session.complete(normalize(&json!({"response": "4"})));

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.transcript().len(), 2);
        let message = session.transcript().last().unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "4");
        assert!(message.tools.is_none());
    }

    #[test]
    fn test_complete_with_tools_attaches_them() {
        let mut session = ChatSession::new();
        session.submit_prompt("search something").unwrap();
        session.complete(NormalizedReply {
            content: "found it".to_string(),
            tools: Some(vec![ToolUse::from_value(&json!({"name": "search"}))]),
        });

        let message = session.transcript().last().unwrap();
        assert_eq!(message.tools.as_ref().unwrap()[0].name, "search");
    }

    #[test]
    fn test_complete_with_empty_tools_attaches_none() {
        let mut session = ChatSession::new();
        session.submit_prompt("hello").unwrap();
        session.complete(NormalizedReply {
            content: "hi".to_string(),
            tools: Some(vec![]),
        });

        assert!(session.transcript().last().unwrap().tools.is_none());
    }

    #[test]
    fn test_fail_prompt_appends_apology() {
        let mut session = ChatSession::new();
        session.submit_prompt("hello").unwrap();
        session.fail();

        assert_eq!(session.phase(), Phase::Idle);
        let message = session.transcript().last().unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, CHAT_ERROR_MESSAGE);
    }

    #[test]
    fn test_submit_instructions_requires_non_blank_draft() {
        let mut session = ChatSession::new();
        assert_eq!(session.submit_instructions(), None);

        session.set_instructions("   ");
        assert_eq!(session.submit_instructions(), None);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_submit_instructions_appends_nothing_until_resolved() {
        let mut session = ChatSession::new();
        session.set_instructions("be brief");
        let sent = session.submit_instructions();

        assert_eq!(sent, Some("be brief".to_string()));
        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), Phase::Busy(Pending::Instructions));
    }

    #[test]
    fn test_complete_instructions_clears_draft_and_hides_panel() {
        let mut session = ChatSession::new();
        session.toggle_instructions();
        session.set_instructions("be brief");
        session.submit_instructions().unwrap();
        session.complete(reply("Instructions updated successfully"));

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.instructions(), "");
        assert!(!session.show_instructions());
        assert_eq!(
            session.transcript().last().unwrap().content,
            "Instructions updated successfully"
        );
    }

    #[test]
    fn test_fail_instructions_keeps_draft_for_retry() {
        let mut session = ChatSession::new();
        session.toggle_instructions();
        session.set_instructions("be brief");
        session.submit_instructions().unwrap();
        session.fail();

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.instructions(), "be brief");
        assert!(session.show_instructions());
        assert_eq!(
            session.transcript().last().unwrap().content,
            INSTRUCTIONS_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_toggle_instructions_flips_visibility() {
        let mut session = ChatSession::new();
        assert!(!session.show_instructions());
        assert!(session.toggle_instructions());
        assert!(!session.toggle_instructions());
    }

    #[test]
    fn test_toggle_instructions_disabled_while_busy() {
        let mut session = ChatSession::new();
        session.submit_prompt("hello").unwrap();

        assert!(!session.toggle_instructions());
        assert!(!session.show_instructions());
    }

    #[test]
    fn test_complete_while_idle_is_noop() {
        let mut session = ChatSession::new();
        session.complete(reply("unsolicited"));
        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_fail_while_idle_is_noop() {
        let mut session = ChatSession::new();
        session.fail();
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_full_prompt_round_trip_order() {
        let mut session = ChatSession::new();
        session.submit_prompt("2+2").unwrap();
        session.complete(normalize(&json!({"response": "4"})));
        session.submit_prompt("and 3+3?").unwrap();
        session.fail();

        let roles: Vec<Role> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }
}
