//! Log formatting shared by every crate of the backend.
//!
//! The binary composes [`layer`] with the [`EnvFilter`] built by
//! [`env_filter_with_level`]. All filtering happens there: with `RUST_LOG`
//! unset, dependencies log at `warn`, request traces from `tower_http` at
//! `info`, and the workspace crates at the requested level. A set `RUST_LOG`
//! replaces all of that.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Target prefixes of the workspace crates.
pub const TARGET_PREFIXES: [&str; 5] = [
    "ai_llm_service",
    "explainer",
    "notes_store",
    "api",
    "curiomind_backend",
];

/// Filter used when `RUST_LOG` is unset, before workspace directives are added.
pub const DEFAULT_DIRECTIVES: &str = "warn,tower_http=info";

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let s = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Compact single-line formatter writing to stdout.
///
/// ANSI colors are enabled only when stdout is a terminal. Span close events
/// are logged so instrumented calls report their duration.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    layer_with_writer(io::stdout, io::stdout().is_terminal())
}

/// Same format as [`layer`], with an explicit writer.
pub fn layer_with_writer<S, W>(writer: W, ansi: bool) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
}

/// Directives raising every workspace crate to `level`.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    TARGET_PREFIXES
        .iter()
        .filter_map(|p| Directive::from_str(&format!("{p}={lvl}")).ok())
        .collect()
}

/// `RUST_LOG` if set, else `default` plus `level` for workspace crates.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    env_filter_from(std::env::var("RUST_LOG").ok().as_deref(), default, level)
}

fn env_filter_from(rust_log: Option<&str>, default: &str, level: Level) -> EnvFilter {
    let explicit = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok());

    match explicit {
        Some(filter) => filter,
        None => level_directives(level)
            .into_iter()
            .fold(EnvFilter::new(default), |f, d| f.add_directive(d)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture_with(filter: EnvFilter, emit: impl FnOnce()) -> String {
        let out = Captured::default();
        let sink = out.clone();
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(layer_with_writer(move || sink.clone(), false));
        tracing::subscriber::with_default(subscriber, emit);
        out.text()
    }

    #[test]
    fn one_directive_per_crate() {
        assert_eq!(level_directives(Level::DEBUG).len(), TARGET_PREFIXES.len());
    }

    #[test]
    fn default_filter_shows_request_traces_and_hides_dependency_noise() {
        let filter = env_filter_from(None, DEFAULT_DIRECTIVES, Level::INFO);
        let out = capture_with(filter, || {
            tracing::info!(target: "tower_http::trace::on_response", "finished processing request");
            tracing::info!(target: "api::routes::explain", "explanation served");
            tracing::info!(target: "hyper::proto::h1", "flushed bytes");
            tracing::debug!(target: "explainer::related", "debug noise");
        });

        assert!(out.contains("finished processing request"), "{out}");
        assert!(out.contains("explanation served"), "{out}");
        assert!(!out.contains("flushed bytes"), "{out}");
        assert!(!out.contains("debug noise"), "{out}");
    }

    #[test]
    fn rust_log_replaces_the_defaults() {
        let filter = env_filter_from(Some("hyper=debug"), DEFAULT_DIRECTIVES, Level::INFO);
        let out = capture_with(filter, || {
            tracing::debug!(target: "hyper::proto::h1", "flushed bytes");
            tracing::info!(target: "tower_http::trace::on_response", "finished processing request");
        });

        assert!(out.contains("flushed bytes"), "{out}");
        assert!(!out.contains("finished processing request"), "{out}");
    }

    #[test]
    fn blank_rust_log_falls_back_to_defaults() {
        let filter = env_filter_from(Some("  "), DEFAULT_DIRECTIVES, Level::INFO);
        let out = capture_with(filter, || {
            tracing::info!(target: "notes_store::repository", "note stored");
        });
        assert!(out.contains("note stored"), "{out}");
    }
}
