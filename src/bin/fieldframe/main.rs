// fieldframe - Run the wave engine offline and write PNG frames
//
// Pipeline:
//   1. Load engine config (JSON, optional), apply flag overrides
//   2. Tick a session on a synthetic clock
//   3. Rasterize each frame's cell colors, write frame_NNNN.png
//
// Usage: cargo run --bin fieldframe -- --mode 4 --grid 20 --emitters 6 --blend 100 --frames 90

#[cfg(not(target_arch = "wasm32"))]
mod raster;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use wavegrid_engine::{FieldConfig, FieldError, FieldSession};

    use crate::raster;

    // Synthetic wall clock origin (ms)
    const START_MS: f64 = 1_000_000.0;

    #[derive(thiserror::Error, Debug)]
    pub enum FrameError {
        #[error("reading config {}: {source}", path.display())]
        Config { path: PathBuf, source: io::Error },

        #[error("creating output directory {}: {source}", path.display())]
        OutputDir { path: PathBuf, source: io::Error },

        #[error("parsing config: {0}")]
        Json(#[from] serde_json::Error),

        #[error("invalid engine config: {0}")]
        Field(#[from] FieldError),

        #[error("writing frame: {0}")]
        Image(#[from] image::ImageError),
    }

    /// Render wave grid frames to PNG
    #[derive(Parser, Debug)]
    #[command(version, about)]
    struct Args {
        /// JSON engine config; the flags below override its fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Cells per side
        #[arg(long)]
        grid: Option<u32>,

        /// Emitter spawn inset from the grid edge
        #[arg(long)]
        margin: Option<u32>,

        #[arg(long)]
        emitters: Option<usize>,

        /// Animation mode, 1-9
        #[arg(long)]
        mode: Option<u8>,

        /// Height color percentage, 0-100
        #[arg(long)]
        blend: Option<f32>,

        #[arg(long, default_value_t = 60)]
        frames: u32,

        #[arg(long, default_value_t = 30.0)]
        fps: f32,

        /// Pixels per cell side
        #[arg(long, default_value_t = 16)]
        cell_px: u32,

        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[arg(long, default_value = "frames")]
        out: PathBuf,
    }

    fn load_config(args: &Args) -> Result<FieldConfig, FrameError> {
        let mut config: FieldConfig = match &args.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|source| FrameError::Config { path: path.clone(), source })?;
                serde_json::from_str(&text)?
            }
            None => FieldConfig::default(),
        };
        if let Some(v) = args.grid { config.grid_size = v; }
        if let Some(v) = args.margin { config.margin = v; }
        if let Some(v) = args.emitters { config.emitters = v; }
        if let Some(v) = args.mode { config.mode = v; }
        if let Some(v) = args.blend { config.blend_percent = v; }
        config.validate()?;
        Ok(config)
    }

    fn prepare_output(dir: &Path) -> Result<(), FrameError> {
        fs::create_dir_all(dir).map_err(|source| FrameError::OutputDir { path: dir.to_path_buf(), source })
    }

    pub fn run() -> Result<(), FrameError> {
        let args = Args::parse();
        let config = load_config(&args)?;
        let cell_px = args.cell_px.max(1);
        let fps = args.fps.max(1.0);

        println!(
            "Rendering {} frames of mode {} ({}x{} grid, {} emitters)...",
            args.frames, config.mode, config.grid_size, config.grid_size, config.emitters
        );

        let mut session = FieldSession::new(&config, args.seed, START_MS)?;
        prepare_output(&args.out)?;

        let mut respawns = 0;
        for frame in 0..args.frames {
            let elapsed = frame as f32 / fps;
            let now = START_MS + frame as f64 * 1000.0 / fps as f64;

            let stats = session.tick(elapsed, now);
            respawns += stats.respawned;
            if frame == 0 && !stats.implemented {
                eprintln!("  mode {} has no wave yet, frames will be flat", config.mode);
            }

            let img = raster::frame_image(session.grid(), session.frame(), cell_px);
            img.save(args.out.join(format!("frame_{frame:04}.png")))?;
        }

        println!("  {} emitter respawns", respawns);
        println!("Done! Frames in {}", args.out.display());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn scratch(name: &str) -> PathBuf {
            std::env::temp_dir().join(format!("fieldframe-{}-{name}", std::process::id()))
        }

        #[test]
        fn missing_config_names_the_file() {
            let path = scratch("absent.json");
            let args = Args::try_parse_from(["fieldframe", "--config", path.to_str().unwrap()]).unwrap();
            let err = load_config(&args).unwrap_err();
            assert!(matches!(err, FrameError::Config { .. }));
            assert!(err.to_string().starts_with("reading config"));
        }

        #[test]
        fn output_dir_failure_is_not_a_config_error() {
            // A regular file blocks directory creation beneath it
            let blocker = scratch("blocker");
            fs::write(&blocker, b"").unwrap();
            let out = blocker.join("frames");

            let err = prepare_output(&out).unwrap_err();
            fs::remove_file(&blocker).unwrap();

            assert!(matches!(&err, FrameError::OutputDir { path, .. } if *path == out));
            assert!(err.to_string().starts_with("creating output directory"));
        }

        #[test]
        fn flags_override_defaults() {
            let args = Args::try_parse_from(["fieldframe", "--grid", "12", "--mode", "4", "--blend", "30"]).unwrap();
            let config = load_config(&args).unwrap();
            assert_eq!((config.grid_size, config.mode, config.blend_percent), (12, 4, 30.0));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
