use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the default filter directive for the requested verbosity.
///
/// `quiet` wins over `verbose` when both are set.
pub fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "xtabs=error"
    } else if verbose {
        "xtabs=debug"
    } else {
        "xtabs=info"
    }
}

/// Initialize logging.
///
/// Events are written as JSON lines to stderr so stdout stays free for the
/// container window id announced at startup. `RUST_LOG` can add directives.
pub fn init_logging(quiet: bool, verbose: bool) {
    let directive = default_directive(quiet, verbose);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("Invalid log directive")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "xtabs=info");
        assert_eq!(default_directive(false, true), "xtabs=debug");
        assert_eq!(default_directive(true, false), "xtabs=error");
        assert_eq!(default_directive(true, true), "xtabs=error");
    }

    #[test]
    fn test_directives_parse() {
        for (quiet, verbose) in [(false, false), (false, true), (true, false)] {
            let directive = default_directive(quiet, verbose);
            assert!(
                directive
                    .parse::<tracing_subscriber::filter::Directive>()
                    .is_ok()
            );
        }
    }
}
