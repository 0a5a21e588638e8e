use http::Request;
use tower_http::trace::MakeSpan;
use tracing::subscriber::set_global_default;
use tracing::{Span, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

use crate::middleware::RequestId;

/// Compose the layers of the tracing stack.
///
/// `RUST_LOG` takes precedence over `env_filter`. `sink` decides where the
/// bunyan-formatted records go (stdout in the binary, `std::io::sink` in tests).
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Register a subscriber as global default to process span data.
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // redirect all `log` events (sqlx emits these) to our subscriber
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

// The request id is fixed when the request enters the stack, so every
// event inside the request span reports the same one.
#[derive(Clone, Copy, Debug)]
pub struct TowerMakeSpanWithConstantId;

impl<B> MakeSpan<B> for TowerMakeSpanWithConstantId {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(ToString::to_string)
            .unwrap_or_default();
        tracing::info_span!(
            "HTTP request",
            %request_id,
            method = %request.method(),
            uri = %request.uri()
        )
    }
}
