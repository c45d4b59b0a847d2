use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}

/// Default directives when `RUST_LOG` is unset.
///
/// 0 = errors only, 1 (-v) = info for `nc.*` targets, 2+ (-vv) = RPC traffic.
/// Library events set `target: "nc.session"` and friends explicitly, so the
/// `nc` directive matches them by prefix rather than by module path.
fn filter_for(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "error",
		1 => "warn,nc=info",
		_ => "debug,nc=trace,hyper=info,reqwest=info",
	}
}
