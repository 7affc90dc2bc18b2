use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `POPCHAT_LOG` nor `RUST_LOG` parses.
pub fn default_filter(component: &str) -> String {
    let component = component.replace('-', "_");
    format!("info,popchat=debug,{component}=debug")
}

/// Installs the global fmt subscriber. Safe to call twice; the second call is ignored.
pub fn init_tracing(component: &str) {
    let filter = std::env::var("POPCHAT_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter(component)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_normalizes_binary_names() {
        assert_eq!(
            default_filter("popchat-relay"),
            "info,popchat=debug,popchat_relay=debug"
        );
        assert!(EnvFilter::try_new(default_filter("popchat-relay")).is_ok());
    }
}
