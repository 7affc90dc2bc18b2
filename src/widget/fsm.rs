use rust_fsm::*;

// `Fresh` is the closed state before the first open; leaving it emits the greeting.
state_machine! {
    popup_visibility(Fresh)

    Fresh(Toggle) => Open [Greet],
    Open(Toggle) => Closed,
    Closed(Toggle) => Open
}

pub struct Visibility {
    machine: popup_visibility::StateMachine,
}

impl Visibility {
    pub fn new() -> Self {
        Self {
            machine: popup_visibility::StateMachine::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.machine.state(), popup_visibility::State::Open)
    }

    /// Flips the popup. Returns `true` only for the very first open.
    pub fn toggle(&mut self) -> bool {
        matches!(
            self.machine.consume(&popup_visibility::Input::Toggle),
            Ok(Some(popup_visibility::Output::Greet))
        )
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new()
    }
}
