pub mod alert;

pub use alert::{AlertKind, Notice, Notifier, TerminalNotifier};
