//! Log output for the `gumus` binary.
//!
//! Nothing is installed unless `RUST_LOG` or `GUMUS_LOG` is set, so a
//! plain run never writes log lines. Logs always go to stderr; stdout
//! belongs to the program.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the subscriber. Safe to call more than once.
///
/// `GUMUS_LOG` takes precedence over `RUST_LOG`. With `GUMUS_LOG_TREE=1`
/// spans are rendered as an indented tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = std::env::var("GUMUS_LOG").or_else(|_| std::env::var("RUST_LOG"));
        let Ok(directives) = directives else {
            return;
        };
        let filter = EnvFilter::new(directives);

        if std::env::var("GUMUS_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
