use std::net::SocketAddr;

use crate::model::Command;

/// Counter: commands applied. Labels: command, status (`ok` or the error kind).
pub const COMMANDS_TOTAL: &str = "salas_commands_total";

/// Gauge: reservations currently held by the engine.
pub const RESERVATIONS_ACTIVE: &str = "salas_reservations_active";

/// Counter: reservations that started within the notice window.
pub const UPCOMING_NOTICES_TOTAL: &str = "salas_upcoming_notices_total";

/// Counter: program lines the reader could not parse.
pub const PARSE_ERRORS_TOTAL: &str = "salas_parse_errors_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), metrics_exporter_prometheus::BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::Reserve { .. } => "reserve",
        Command::Cancel { .. } => "cancel",
        Command::List => "list",
        Command::Reprogram { .. } => "reprogram",
        Command::Blank => "blank",
    }
}
