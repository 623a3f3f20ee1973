pub mod commands;
pub mod controls;
pub mod logging;
pub mod repl;
pub mod terminal;

pub use commands::{Command, CommandError, Setting};
pub use controls::Controls;
pub use logging::init_logging;
pub use repl::{Flow, Repl};
pub use terminal::TerminalSurface;
