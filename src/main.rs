use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use gpui_linsys::export::finish_export;
use gpui_linsys::{Error, LineId, PlotConfig, Session, Theme};

#[derive(Debug, Parser)]
#[command(name = "linsys")]
#[command(version)]
#[command(about = "Solve and plot a pair of linear equations.", long_about = None)]
struct Args {
    /// First equation, e.g. "2x + 3y = 6".
    #[arg(long, allow_hyphen_values = true)]
    eq1: Option<String>,
    /// Second equation, e.g. "y = 2x - 1".
    #[arg(long, allow_hyphen_values = true)]
    eq2: Option<String>,
    /// Zoom factor applied about the view center (> 1 zooms in).
    #[arg(long)]
    zoom: Option<f64>,
    /// Pan by a drag delta in pixels.
    #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
    pan: Option<Vec<f32>>,
    /// Print the step-by-step solution.
    #[arg(long, short)]
    steps: bool,
    /// Write the picture as a PNG file.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Write the session snapshot as JSON.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Square output size in pixels (defaults to the configured export size).
    #[arg(long)]
    size: Option<u32>,
    /// Color theme for the PNG.
    #[arg(long, default_value_t = ThemeChoice::Light, value_enum)]
    theme: ThemeChoice,
    /// JSON configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum ThemeChoice {
    /// White background.
    Light,
    /// Dark background.
    Dark,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    let theme = match args.theme {
        ThemeChoice::Light => Theme::light(),
        ThemeChoice::Dark => Theme::dark(),
    };
    let mut session = Session::builder().config(config).theme(theme).build();

    if let Some(text) = &args.eq1 {
        session.set_from_text(LineId::First, text)?;
    }
    if let Some(text) = &args.eq2 {
        session.set_from_text(LineId::Second, text)?;
    }
    if let Some(factor) = args.zoom {
        session.zoom_at(session.screen().center(), factor);
    }
    if let Some([dx, dy]) = args.pan.as_deref().and_then(|pan| <[f32; 2]>::try_from(pan).ok()) {
        session.pan_by(dx, dy);
    }

    for id in LineId::BOTH {
        println!("Line {}: {}", id.number(), session.display_text(id));
    }
    println!("{}", session.status());
    println!("{}", session.viewport().describe());

    if args.steps {
        println!();
        for (index, step) in session.solution_steps().iter().enumerate() {
            println!("{}. {step}", index + 1);
        }
    }

    let snapshot = session.export_snapshot();
    if let Some(path) = &args.snapshot {
        snapshot.save_json(path)?;
    }
    if let Some(path) = args.output {
        let mut options = session.export_options();
        if let Some(size) = args.size {
            options = options.with_size(size, size);
        }
        finish_export(snapshot.spawn_png_export(path.clone(), options))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
