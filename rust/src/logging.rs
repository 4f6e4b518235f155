//! Verbosity-gated logging macros for the scheduler.
//!
//! Nothing is formatted unless the configured verbosity reaches the level.
//! Levels:
//! - 0: SILENT
//! - 1: CHANGES (picks, rewinds, fallbacks)
//! - 2: CHECKS (candidate sets considered on each iteration)
//! - 3: DEBUG (cursor movement and other internals)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Prefix attached to every scheduler log line.
pub const LOG_PREFIX: &str = "[scheduler]";

/// Log a scheduling decision (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("{} {}", $crate::logging::LOG_PREFIX, format_args!($($arg)*));
        }
    };
}

/// Log candidate evaluation (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("{} {}", $crate::logging::LOG_PREFIX, format_args!($($arg)*));
        }
    };
}

/// Log algorithm internals (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("{} {}", $crate::logging::LOG_PREFIX, format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_macros_accept_format_args() {
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "picked {}", "a");
        log_checks!(verbosity, "{} candidates", 2);
        log_debug!(verbosity, "cursor={:?}", Some(1));
    }
}
