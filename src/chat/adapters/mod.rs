//! Chat adapters.

pub mod memory;
pub mod shell;

pub use memory::RecordingChatSink;
pub use shell::{SHELL_ROOM, ShellChatAdapter, StreamChatSink, render_line};
