use ::tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

pub const DEFAULT_FILTER: &str = "info";

/// Bunyan JSON subscriber. `RUST_LOG` overrides `env_filter`
/// (trace|debug|info|warn|error|off).
pub fn get_subscriber<Sink>(
    name: &str,
    env_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter)))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name.into(), sink))
}

/// Installs the process-wide subscriber writing to stderr.
///
/// Stdout stays reserved for the per-frame volume percentage.
pub fn init(name: &str) -> crate::Result<()> {
    init_subscriber(get_subscriber(name, DEFAULT_FILTER, std::io::stderr))
}

fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> crate::Result<()> {
    LogTracer::init().map_err(crate::Error::as_unknown_error)?;
    set_global_default(subscriber).map_err(crate::Error::as_unknown_error)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    use super::get_subscriber;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("Failed to lock buffer")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_bunyan_json_records() {
        let buffer = Buffer::default();
        let sink = buffer.clone();
        let subscriber = get_subscriber("gesture-volume-test", "info", move || sink.clone());

        ::tracing::subscriber::with_default(subscriber, || {
            ::tracing::info!(vol_per = 40, "Volume set");
        });

        let output = String::from_utf8(buffer.0.lock().expect("Failed to lock").clone())
            .expect("Output is not utf8");
        let record: serde_json::Value = serde_json::from_str(
            output
                .lines()
                .find(|l| l.contains("Volume set"))
                .expect("Missing log record"),
        )
        .expect("Record is not json");
        assert_eq!(record["name"], "gesture-volume-test");
        assert_eq!(record["vol_per"], 40);
    }
}
