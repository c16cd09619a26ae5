//! Glint studio
//!
//! Renders a shimmering skeleton card, frame by frame, to PNG files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::render::{CpuRenderer, Pixmap};
use glint_ui::prelude::*;
use glint_ui::shimmer::{BASE_COLOR_ATTR, HIGHLIGHT_COLOR_ATTR};

mod card;

#[derive(Parser, Debug)]
#[command(name = "glint-studio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a shimmering skeleton placeholder to PNG frames", long_about = None)]
struct Cli {
    /// Frame width in pixels
    #[arg(long, default_value_t = 360)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 96)]
    height: u32,

    /// Number of frames to render
    #[arg(long, default_value_t = 66)]
    frames: u32,

    /// Frames per second of the simulated clock
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Resting band color (#RGB, #RRGGBB or #AARRGGBB)
    #[arg(long, default_value = "#e0e0e0")]
    base: String,

    /// Peak band color (#RGB, #RRGGBB or #AARRGGBB)
    #[arg(long, default_value = "#f5f5f5")]
    highlight: String,

    /// Card background color
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Output directory
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Log filter, e.g. "info" or "glint_ui=debug"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        timestamps: false,
        ..LoggingConfig::default()
    });

    if cli.width == 0 || cli.height == 0 {
        bail!("frame size must be non-zero, got {}x{}", cli.width, cli.height);
    }

    let mut attrs = AttributeSet::new();
    attrs
        .insert_hex(BASE_COLOR_ATTR, &cli.base)
        .with_context(|| format!("invalid --base color {:?}", cli.base))?;
    attrs
        .insert_hex(HIGHLIGHT_COLOR_ATTR, &cli.highlight)
        .with_context(|| format!("invalid --highlight color {:?}", cli.highlight))?;
    let background = Color::from_hex(&cli.background)
        .with_context(|| format!("invalid --background color {:?}", cli.background))?;

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("failed to create output directory {}", cli.out.display()))?;

    let (w, h) = (cli.width as f32, cli.height as f32);
    let root = card::skeleton_card(w, h, background, Shimmer::from_source(&attrs));
    let mut ui = UiScene::new(root);
    ui.attach();

    let mut clock = FrameClock::fixed_rate(cli.fps);
    let mut renderer = CpuRenderer::new();
    let mut pixmap = Pixmap::new(cli.width, cli.height)?;
    let viewport = Vec2::new(w, h);

    log::info!(
        "rendering {} frame(s) at {}x{}, {} fps, into {}",
        cli.frames,
        cli.width,
        cli.height,
        cli.fps,
        cli.out.display()
    );

    for i in 0..cli.frames {
        let frame = clock.tick();
        if !ui.tick(&frame) {
            log::debug!("frame {i}: no repaint requested, reusing previous image");
        } else {
            pixmap.fill(Color::transparent());
            renderer
                .render(ui.frame(viewport), &mut pixmap)
                .with_context(|| format!("failed to render frame {i}"))?;
        }

        let path = cli.out.join(format!("frame_{i:04}.png"));
        write_png(&pixmap, &path)?;
        log::trace!("wrote {}", path.display());
    }

    ui.detach();
    log::info!("done");
    Ok(())
}

fn write_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.to_rgba8())
        .context("pixmap buffer does not match its size")?;
    img.save(path).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
