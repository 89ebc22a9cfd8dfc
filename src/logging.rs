use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "tempest",
    "tempest_calendar",
    "tempest_engine",
    "tempest_io",
    "tempest_params",
    "tempest_pet",
    "tempest_precip",
    "tempest_spell",
    "tempest_temperature",
];

fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_filter(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on CLI verbosity level.
///
/// 0 maps to warn, `-v` to info, `-vv` to debug and `-vvv` to trace.
/// `RUST_LOG` overrides the flag when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn filter_covers_every_crate() {
        let filter = default_filter(2);
        assert!(filter.starts_with("tempest=debug,"));
        assert_eq!(filter.matches("=debug").count(), CRATE_TARGETS.len());
        assert!(filter.contains("tempest_engine=debug"));
    }
}
