use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bloomgarden", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the scene at a point in time as a PNG.
    Frame(FrameArgs),
    /// Print the resolved frame as JSON.
    Dump(SceneArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene time in seconds.
    #[arg(long)]
    time: f64,

    /// Viewport width in px.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in px.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Determinism seed for heart placement.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Scene time at which the button is clicked. Negative leaves the
    /// scene unrevealed.
    #[arg(long, default_value_t = 0.0)]
    activate_at: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// TTF/OTF font for the button label and caption.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSans.ttf"))]
    font: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn make_scene(args: &SceneArgs) -> anyhow::Result<bloomgarden::Scene> {
    let viewport = bloomgarden::Viewport::new(args.width, args.height)?;
    let mut scene = bloomgarden::Scene::new(viewport, args.seed);
    if args.activate_at >= 0.0 {
        scene.activate(args.activate_at);
        scene.tick(args.time);
    }
    Ok(scene)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = make_scene(&args.scene)?;
    let frame = scene.frame(args.scene.time)?;

    let settings = bloomgarden::RenderSettings {
        clear_rgba: Some([0x87, 0xce, 0xeb, 0xff]),
    };
    let mut renderer = bloomgarden::CpuRenderer::new();
    let font_bytes = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;
    renderer.load_font(font_bytes)?;
    let pixels = renderer.render(&frame, scene.viewport(), &settings)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &pixels.to_straight_rgba(),
        pixels.width,
        pixels.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write PNG '{}'", args.out.display()))?;

    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: SceneArgs) -> anyhow::Result<()> {
    let scene = make_scene(&args)?;
    let frame = scene.frame(args.time)?;
    let json = serde_json::to_string_pretty(&frame).context("serialize frame")?;
    println!("{json}");
    Ok(())
}
