//! Human-readable output of hook results.

pub mod console;

pub use console::ConsoleOutput;
