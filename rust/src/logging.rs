//! Logging macros for the optimizer with verbosity level control.
//!
//! Messages go to stderr with a bracketed tag naming the optimizer step. The
//! arguments are not evaluated below the macro's level.
//! - 0: SILENT
//! - 1: CHANGES, `[seed]` `[stage]` `[optimizer]`
//! - 2: CHECKS, `[gate]` `[cap]` `[admit]`
//! - 3: DEBUG, `[expand]` `[candidate]`

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// `[seed]` each start vertex with its clear time, `[stage]` how many gem
/// levels of a stage were expanded, `[optimizer]` strategy count and label
/// totals once a solve finishes.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// `[gate]` a successor skipped because the label holds fewer gems than it
/// requires, `[seed]`/`[cap]` a clear option that would pass the gem cap,
/// `[admit]` a label evicted by a faster one or a candidate turned away from
/// a full vertex.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// `[expand]` every label as its vertex is expanded, `[candidate]` every
/// (vertex, time) formed from it before admission.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_silent_verbosity_skips_argument_formatting() {
        struct Panics;
        impl std::fmt::Display for Panics {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                panic!("formatted while silent");
            }
        }

        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "stage {}", Panics);
        log_checks!(verbosity, "gate {}", Panics);
        log_debug!(verbosity, "label {}", Panics);
    }
}
