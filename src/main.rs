mod enclosures;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use log::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::enclosures::{
    adapter::{json_catalog::JsonCatalog, line_protocol, reference_catalog::ReferenceCatalog},
    create_evaluator,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log_panics::init();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("while installing the tracing subscriber")?;

    // Optional path to a JSON catalog, the built-in zoo otherwise.
    let evaluator = match std::env::args().nth(1) {
        Some(path) => create_evaluator(&JsonCatalog::new(path))?,
        None => create_evaluator(&ReferenceCatalog)?,
    };
    info!("reading requests from stdin");

    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line.context("while reading a request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = line_protocol::handle_line(&evaluator, &line);
        writeln!(stdout, "{response}")?;
    }

    info!("end of input");
    Ok(())
}
