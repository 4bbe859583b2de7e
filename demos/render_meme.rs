//! Meme Renderer
//!
//! Letterboxes an image onto a canvas, draws top/bottom captions and writes a PNG.
//!
//! Usage:
//!   cargo run --example render_meme -- <image> <font.ttf> <top> <bottom> [output.png] [config.json]
//!
//! Examples:
//!   cargo run --example render_meme -- cat.jpg fonts/Impact.ttf "I CAN HAZ" "RUST"
//!   RUST_LOG=debug cargo run --example render_meme -- cat.png fonts/Impact.ttf "" "BOTTOM" out/cat.png meme.json

use meme_core::{load_asset, CaptionStyle, MemeConfig, MemeGenerator, RasterSurface};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 5 {
        eprintln!(
            "Usage: {} <image> <font.ttf> <top> <bottom> [output.png] [config.json]",
            args[0]
        );
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cargo run --example render_meme -- cat.jpg fonts/Impact.ttf \"TOP\" \"BOTTOM\"");
        std::process::exit(1);
    }

    let image_path = &args[1];
    let font_path = &args[2];
    let top = &args[3];
    let bottom = &args[4];

    // Derive output path from image name if not provided
    let output_path = if args.len() > 5 {
        args[5].clone()
    } else {
        let stem = Path::new(image_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("meme");
        format!("output/{}_meme.png", stem)
    };

    let config = match args.get(6) {
        Some(config_path) => {
            let json = std::fs::read_to_string(config_path)
                .map_err(|e| format!("Failed to read config '{}': {}", config_path, e))?;
            MemeConfig::from_json(&json)?
        }
        // Outlined captions unless a config says otherwise
        None => MemeConfig {
            caption: CaptionStyle::default().outlined(),
            ..MemeConfig::default()
        },
    };

    if let Some(parent) = Path::new(&output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let font = std::fs::read(font_path)
        .map_err(|e| format!("Failed to read font '{}': {}", font_path, e))?;
    let surface = RasterSurface::new(config.canvas_width, config.canvas_height)?.with_font(font)?;
    let mut meme = MemeGenerator::new(surface, config)?;

    let image_bytes = std::fs::read(image_path)
        .map_err(|e| format!("Failed to read image '{}': {}", image_path, e))?;
    let asset = load_asset(&image_bytes)?;

    let placement = meme.on_asset_loaded(&asset)?;
    println!(
        "Placed {}x{} image at ({:.1}, {:.1}) size {:.1}x{:.1}",
        asset.width(),
        asset.height(),
        placement.start_x,
        placement.start_y,
        placement.width,
        placement.height
    );

    meme.on_generate_requested(top, bottom)?;

    std::fs::write(&output_path, meme.surface().encode_png()?)?;

    println!("Generated: {}", output_path);

    Ok(())
}
