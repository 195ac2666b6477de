use std::path::PathBuf;

use tracing::info;

use salas::clock::SystemClock;
use salas::config::{Config, OutputFormat};
use salas::engine::Engine;
use salas::program;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: salas <program-file>")?;

    let config = Config::from_env();
    salas::observability::init(config.metrics_port)?;

    info!("salas running {}", path.display());
    info!("  max_duration: {} min", config.max_duration_minutes);
    info!("  notice_window: {} min", config.notice_window_minutes);

    let source = std::fs::read_to_string(&path)?;
    let mut engine = Engine::new(&config, Box::new(SystemClock));
    let results = program::run(&mut engine, &source);

    for line in &results {
        match config.output {
            OutputFormat::Json => println!("{}", line.to_json()?),
            OutputFormat::Text => match &line.result {
                Ok(outcome) => println!("{outcome}"),
                Err(e) => println!("{e}"),
            },
        }
    }

    info!(
        lines = results.len(),
        active = engine.store().len(),
        "program finished"
    );
    Ok(())
}
