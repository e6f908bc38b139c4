//! i3bar integration: relay a status-line program's stream with a Copilot
//! usage element prepended to every frame.

pub mod multiplexer;
pub mod protocol;

pub use multiplexer::{
    DEFAULT_STATUS_PROGRAM, REFRESH_INTERVAL, StatusBarMultiplexer, StatusCommand,
};
pub use protocol::{StatusElement, StatusLine};
