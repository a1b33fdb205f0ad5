use crate::*;

use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::{Level, Span};
pub use tracing_appender::non_blocking::WorkerGuard;
pub use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const LOG_FILE_PREFIX: &str = "todos.log";
const QUIET_DEPS: [&str; 4] = ["h2=info", "hyper=info", "hyper_util=info", "tower_http=info"];

fn pretty_filter() -> EnvFilter {
    let default = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    QUIET_DEPS
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
            |filter, directive| filter.add_directive(directive),
        )
}

/// Initializes log collection: shell output plus daily rolling files when `log_dir` is set.
///
/// The returned guard flushes buffered file logs on drop so it should live as long as the app.
pub fn init_tracing_subscriber(config: &AppConfig) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(pretty_filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let shell_layer = fmt::layer()
        .with_timer(ChronoUtc::new("%k:%M:%S".to_owned()))
        .with_filter(pretty_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(shell_layer)
        .init();
    guard
}

/// Requests that are logged only at trace level
fn quiet_path(path: &str) -> bool {
    path == "/health" || path == STYLESHEET_PATH
}

pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> Span + Clone + Copy,
    (),
    impl Fn(&Response<Body>, Duration, &Span) + Clone + Copy,
    (),
    (),
> {
    TraceLayer::new_for_http()
        .on_eos(())
        .on_body_chunk(())
        .on_request(())
        .on_response(|resp: &Response, latency: Duration, span: &Span| {
            let millis = latency.as_secs_f64() * 1000.0;
            let status = resp.status();
            if let Some(metadata) = span.metadata() {
                match *metadata.level() {
                    Level::DEBUG => tracing::debug!("'{status}' in {millis:.1}ms"),
                    Level::TRACE => tracing::trace!("'{status}' in {millis:.1}ms"),
                    _ => {}
                }
            }
        })
        .make_span_with(|request: &Request| {
            let uri = request.uri().to_string();

            if quiet_path(request.uri().path()) {
                let method = request.method().as_str();
                return tracing::trace_span!("->", method, uri);
            }

            match *request.method() {
                Method::GET => tracing::debug_span!("-> GET   ", uri),
                Method::POST => tracing::debug_span!("-> POST  ", uri),
                _ => tracing::debug_span!("->", method = request.method().as_str(), uri),
            }
        })
}
