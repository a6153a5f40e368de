//! App roots, one per bundle

pub mod home;
pub mod novatrace;
pub mod shell;

pub use home::HomeApp;
pub use novatrace::NovaTraceApp;
pub use shell::ShellApp;
