pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod logging;
pub mod providers;
pub mod relay;
pub mod widget;

pub use error::PopchatError;

pub type Result<T> = std::result::Result<T, PopchatError>;
