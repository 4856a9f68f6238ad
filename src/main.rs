//! `lsystem-canvas` — draws an L-System headlessly and prints the run report.
//!
//! **Usage:**
//! ```text
//! lsystem-canvas --preset plant-a
//! lsystem-canvas --config scene.json --generations 3
//! lsystem-canvas --list
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lsystem_canvas::{Preset, RenderConfig, SceneConfig, draw_lsystem};
use tracing_subscriber::EnvFilter;

/// Draw an L-System with turtle graphics and report the canvas it needs.
#[derive(Parser)]
#[command(name = "lsystem-canvas", version)]
struct Args {
    /// Built-in grammar to draw.
    #[arg(long, conflicts_with = "config")]
    preset: Option<Preset>,

    /// JSON scene file with `generations`, `step`, `angle`, `seed`, `rules`
    /// and an optional `render` section.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of generations.
    #[arg(long)]
    generations: Option<u32>,

    /// Override the canvas margin.
    #[arg(long)]
    margin: Option<f32>,

    /// List the built-in presets and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lsystem_canvas=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for preset in Preset::ALL {
            let p = preset.params();
            println!(
                "{preset:<22} n={} step={} angle={} seed={}",
                p.generations, p.step, p.angle, p.seed
            );
        }
        return Ok(());
    }

    let mut scene = match (&args.config, args.preset) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SceneConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        (None, Some(preset)) => SceneConfig {
            lsystem: preset.params(),
            render: RenderConfig::default(),
        },
        (None, None) => bail!("either --preset or --config is required (see --list)"),
    };

    if let Some(generations) = args.generations {
        scene.lsystem.generations = generations;
    }
    if let Some(margin) = args.margin {
        scene.render.margin = margin;
    }

    tracing::info!(
        generations = scene.lsystem.generations,
        step = scene.lsystem.step,
        angle = scene.lsystem.angle,
        seed = %scene.lsystem.seed,
        "drawing"
    );

    let mut ctx = scene.render.recording_context();
    let report = draw_lsystem(&scene.lsystem, &mut ctx)?;

    let mut output = serde_json::to_value(&report)?;
    output["segments_drawn"] = ctx.turtle.segments().len().into();
    output["canvas_resizes"] = ctx.canvas.resize_count().into();
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
