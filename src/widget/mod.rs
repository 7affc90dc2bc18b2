pub mod client;
pub mod fsm;
pub mod state;
pub mod ui;

pub use client::RelayClient;
pub use state::{ChatWidget, FAILURE_PLACEHOLDER, GREETING};
