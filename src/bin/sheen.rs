use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sheen::{
    Brush, ChromeEngine, ColorGroup, ColorRole, EngineOpts, Interaction, Orientation, Painter,
    PixelRect, Rgba8, Surface, WidgetKind,
};

#[derive(Parser, Debug)]
#[command(name = "sheen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every widget kind and a window shadow into a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Engine options JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheet width in pixels.
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(96..=4096))]
    width: u32,

    /// Sheet height in pixels.
    #[arg(long, default_value_t = 360, value_parser = clap::value_parser!(u32).range(96..=4096))]
    height: u32,

    /// Draw the window as unfocused.
    #[arg(long)]
    inactive: bool,
}

const BACKDROP: Rgba8 = Rgba8::opaque(0x7f, 0x86, 0x8c);
const TITLE_BAR_PX: i32 = 24;
const INTERACTIONS: [Interaction; 4] = [
    Interaction::Normal,
    Interaction::Hovered,
    Interaction::Pressed,
    Interaction::Disabled,
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
    }
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let opts = match &args.config {
        Some(path) => EngineOpts::from_path(path)?,
        None => EngineOpts::default(),
    };
    let mut engine = ChromeEngine::new(opts)?;
    let mut surface = Surface::new(args.width, args.height);
    draw_sheet(&mut engine, &mut surface, !args.inactive);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let rgba = surface.into_image().to_rgba_image();
    image::save_buffer_with_format(
        &args.out,
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    let stats = engine.cache().stats();
    tracing::info!(
        entries = engine.cache().len(),
        bytes = engine.cache().total_cost(),
        hits = stats.hits,
        misses = stats.misses,
        "preview rendered"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn draw_sheet(engine: &mut ChromeEngine, surface: &mut Surface, active: bool) {
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    surface.fill_rect(PixelRect::from_size(w, h), &Brush::Solid(BACKDROP.to_premul()));

    let group = if active {
        ColorGroup::Active
    } else {
        ColorGroup::Inactive
    };
    let margin = engine.shadow_size() + 8;
    let window = PixelRect::new(margin, margin, w - 2 * margin, h - 2 * margin);
    if window.is_empty() {
        return;
    }
    engine.render_shadow(surface, active, false, window);
    let fill = engine.palettes().color(group, ColorRole::Window);
    surface.fill_rect(window, &Brush::Solid(fill.to_premul()));

    let title = PixelRect::new(window.x, window.y, window.width, TITLE_BAR_PX);
    let color = engine.color_state(WidgetKind::TitleBar, Interaction::Normal, group);
    engine.render_tile(surface, title, WidgetKind::TitleBar, color, Orientation::Horizontal);

    let kinds: Vec<WidgetKind> = WidgetKind::ALL
        .into_iter()
        .filter(|k| *k != WidgetKind::TitleBar)
        .collect();
    let body_y = window.y + TITLE_BAR_PX + 8;
    let row_h = ((window.bottom() - body_y - 8) / kinds.len() as i32).max(8);
    let col_w = (window.width - 8) / INTERACTIONS.len() as i32;

    for (row, kind) in kinds.into_iter().enumerate() {
        let y = body_y + row as i32 * row_h;
        let cell_h = match kind {
            WidgetKind::SliderGroove => 6,
            WidgetKind::ScrollBarGroove => 12,
            _ => row_h - 4,
        }
        .min(row_h - 4);
        for (col, interaction) in INTERACTIONS.into_iter().enumerate() {
            let x = window.x + 8 + col as i32 * col_w;
            let cell = PixelRect::new(x, y + (row_h - 4 - cell_h) / 2, col_w - 8, cell_h);
            let color = engine.color_state(kind, interaction, group);
            engine.render_tile(surface, cell, kind, color, Orientation::Horizontal);
        }
    }
}
