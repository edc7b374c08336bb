use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("QRFORGE_DEBUG").is_ok())
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QRFORGE_PARALLEL_MASKS", true))
}

static PARALLEL_MIN_VERSION: OnceLock<usize> = OnceLock::new();

/// Smallest version whose mask candidates are scored on the rayon pool.
pub(crate) fn parallel_min_version() -> usize {
    *PARALLEL_MIN_VERSION
        .get_or_init(|| parse_env_usize("QRFORGE_PARALLEL_MIN_VERSION", 7).clamp(1, 40))
}
