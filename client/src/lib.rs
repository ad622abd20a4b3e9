//! Manual HTTP API testing remote: configurable send slots fired through a
//! relay, webhook URLs for receive slots, and a live merged traffic log.

pub mod clipboard;
pub mod clock;
pub mod config;
pub mod config_manager;
pub mod console;
pub mod controller;
pub mod error;
pub mod location;
pub mod log_view;
pub mod logging;
pub mod modal;
pub mod models;
pub mod poller;
pub mod relay;
pub mod slots;
pub mod utils;
pub mod view;

#[cfg(test)]
mod test_support;

pub use controller::RemoteController;
pub use error::{ClipboardError, RemoteError};
pub use view::{MemorySurface, Role, Surface, UiEvent};
