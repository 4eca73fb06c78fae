use tracing_subscriber::EnvFilter;

use crate::display::Context;

/// Directive used when `RUST_LOG` is unset.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fep_extract=warn,fepx=warn",
        1 => "fep_extract=info,fepx=info,warn",
        _ => "fep_extract=debug,fepx=debug,info",
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init(ctx: &Context) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(ctx.verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(ctx.verbosity > 1)
        .without_time()
        .try_init();
}
