/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("api", "{} {}", method, endpoint);
/// log_status!("config", "Saved {}", path.display());
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;
pub mod output;

// Re-export everything from core for ergonomic library use
// Users can write `helperkit::strings` instead of `helperkit::core::strings`
pub use crate::core::*;
