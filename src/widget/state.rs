use std::fmt::Display;

use crate::domains::chat::Message;
use crate::widget::fsm::Visibility;

pub const GREETING: &str = "👋 Hi there! How can I help you today?";
pub const FAILURE_PLACEHOLDER: &str = "❌ Failed to get response.";

/// Transient state of one popup chat instance.
///
/// Nothing here is persisted; dropping the widget drops the conversation.
pub struct ChatWidget {
    visibility: Visibility,
    messages: Vec<Message>,
    input: String,
    in_flight: usize,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::new(),
            messages: Vec::new(),
            input: String::new(),
            in_flight: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn toggle(&mut self) -> bool {
        if self.visibility.toggle() {
            self.messages.push(Message::assistant(GREETING));
        }
        self.is_open()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Moves the current input into the transcript and returns the text to send.
    ///
    /// Blank input is ignored. The button is disabled while loading, but Enter
    /// still reaches here, so several calls may be outstanding at once.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.messages.push(Message::user(text.clone()));
        self.in_flight += 1;
        Some(text)
    }

    /// Records the outcome of one call started by [`ChatWidget::begin_send`].
    pub fn settle<E: Display>(&mut self, outcome: Result<String, E>) {
        let content = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(error = %err, "relay request failed");
                FAILURE_PLACEHOLDER.to_string()
            }
        };
        self.messages.push(Message::assistant(content));
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::chat::Role;

    #[test]
    fn greeting_is_injected_once() {
        let mut widget = ChatWidget::new();
        assert!(widget.messages().is_empty());
        assert!(widget.toggle());
        assert_eq!(widget.messages(), &[Message::assistant(GREETING)]);
        assert!(!widget.toggle());
        assert!(widget.toggle());
        assert_eq!(widget.messages().len(), 1);
    }

    #[test]
    fn blank_input_is_a_noop() {
        let mut widget = ChatWidget::new();
        for blank in ["", "   ", "\t\n"] {
            widget.set_input(blank);
            assert!(widget.begin_send().is_none());
        }
        assert!(widget.messages().is_empty());
        assert!(!widget.is_loading());
    }

    #[test]
    fn send_appends_user_turn_and_clears_input() {
        let mut widget = ChatWidget::new();
        widget.set_input(" hello ");
        assert_eq!(widget.begin_send().as_deref(), Some(" hello "));
        assert_eq!(widget.input(), "");
        assert!(widget.is_loading());
        assert_eq!(widget.messages(), &[Message::user(" hello ")]);

        widget.settle(Ok::<_, String>("hi!".to_string()));
        assert!(!widget.is_loading());
        assert_eq!(widget.messages().last(), Some(&Message::assistant("hi!")));
    }

    #[test]
    fn failure_settles_with_placeholder() {
        let mut widget = ChatWidget::new();
        widget.set_input("ping");
        widget.begin_send();
        widget.settle(Err::<String, _>("connection refused"));
        let last = widget.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, FAILURE_PLACEHOLDER);
        assert!(!widget.is_loading());
    }

    #[test]
    fn overlapping_sends_keep_loading_until_all_settle() {
        let mut widget = ChatWidget::new();
        widget.set_input("one");
        widget.begin_send();
        widget.set_input("two");
        widget.begin_send();

        widget.settle(Ok::<_, String>("first".to_string()));
        assert!(widget.is_loading());
        widget.settle(Ok::<_, String>("second".to_string()));
        assert!(!widget.is_loading());
        assert_eq!(widget.messages().len(), 4);
    }
}
