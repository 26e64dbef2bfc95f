#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use dqcalc::{App, init_logging};
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "dqcalc")]
#[command(about = "Estimate how data quality problems distort A/B test results")]
struct Args {
    /// Path to the data directory (default: ~/.dqcalc/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// YAML experiment to start from instead of the saved defaults
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Compute once and print the result as JSON instead of starting the TUI
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "native")]
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(dqcalc::data::DataDirectory::default_path);

    init_logging(&data_dir, &args.log_level)?;

    if args.json {
        let input = dqcalc::headless::load_start_input(&data_dir, args.input.as_deref())?;
        let json = dqcalc::headless::result_json(&input)?;
        println!("{json}");
        return Ok(());
    }

    let mut app = App::with_data_dir(data_dir, args.input.as_deref());

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("This binary requires the 'native' feature.");
}
