/// Prints a diagnostic line to stderr when `QRFORGE_DEBUG` is set.
macro_rules! qr_debug {
    ($($arg:tt)*) => {
        if $crate::common::config::debug_enabled() {
            eprintln!("[qrforge] {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use qr_debug;
