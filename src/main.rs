use clap::Parser;
use kurbo::Size;
use std::path::PathBuf;
use textpath::{compute_path, ComposeConfig, RecordedShaper, Recording};

#[derive(Parser)]
#[command(name = "textpath", about = "Styled text layout to a normalized curve-command path")]
struct Cli {
    /// Recorded shaping output (JSON)
    #[arg(short, long)]
    recording: PathBuf,

    /// Layout width (defaults to the recorded bounds)
    #[arg(long)]
    width: Option<f64>,

    /// Layout height (defaults to the recorded bounds)
    #[arg(long)]
    height: Option<f64>,

    /// Leave per-run attributes out of the model
    #[arg(long)]
    no_attributes: bool,

    /// Compute metrics only, without the composed path
    #[arg(long)]
    metrics_only: bool,

    /// Write the curve text here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// Flags only switch things off; recorded settings stand otherwise.
    fn apply(&self, config: &mut ComposeConfig) {
        if self.no_attributes {
            config.include_attributes = false;
        }
        if self.metrics_only {
            config.include_path = false;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let recording = Recording::load(&cli.recording)?;
    let shaper = RecordedShaper::from_recording(&recording)?;

    let mut config = recording.config.clone().unwrap_or_default();
    cli.apply(&mut config);

    let bounds = Size::new(
        cli.width.unwrap_or(recording.bounds.width),
        cli.height.unwrap_or(recording.bounds.height),
    );

    eprintln!();
    eprintln!("  textpath \u{00b7} {}", cli.recording.display());
    eprintln!();

    let Some(composed) = compute_path(&shaper, &recording.text, bounds, &config)? else {
        eprintln!("  Empty       nothing to compose");
        return Ok(());
    };

    let bounds = composed.composed_bounds;
    eprintln!(
        "  Layout      {} lines \u{00b7} {} glyphs",
        composed.line_count(),
        composed.glyph_count(),
    );
    eprintln!(
        "  Bounds      {:.2}\u{00d7}{:.2} at ({:.2}, {:.2})",
        bounds.width(),
        bounds.height(),
        bounds.x0,
        bounds.y0,
    );

    if composed.path.is_some() {
        let curve = composed.curve_text();
        match &cli.output {
            Some(path) => {
                std::fs::write(path, &curve)?;
                eprintln!("  \u{2713} {}", path.display());
            }
            None => println!("{curve}"),
        }
    }

    eprintln!();
    Ok(())
}
