//! Verbosity levels map onto progressively wider filters.

use logging::{MAX_LEVEL, TARGETS, VerbosityConfig};

#[test]
fn every_level_keeps_warnings() {
    for level in 0..=MAX_LEVEL {
        let directives = VerbosityConfig::from_verbose_level(level).directives();
        assert!(directives.starts_with("warn"), "level {level}: {directives}");
    }
}

#[test]
fn levels_are_monotonic() {
    let lengths: Vec<usize> = (0..MAX_LEVEL)
        .map(|level| VerbosityConfig::from_verbose_level(level).directives().len())
        .collect();
    assert!(lengths.windows(2).all(|pair| pair[0] < pair[1]), "{lengths:?}");
}

#[test]
fn top_level_reaches_every_target() {
    let directives = VerbosityConfig::from_verbose_level(MAX_LEVEL).directives();
    for target in TARGETS {
        let root = target.split("::").next().unwrap();
        assert!(directives.contains(&format!("{root}=trace")), "{target}");
    }
}

#[cfg(feature = "subscriber")]
#[test]
fn try_init_is_idempotent_from_the_callers_view() {
    let _ = logging::try_init_tracing(VerbosityConfig::from_verbose_level(1));
    let second = logging::try_init_tracing(VerbosityConfig::from_verbose_level(1));
    assert!(second.is_err());
}
