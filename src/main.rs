// SPDX-License-Identifier: MIT
//
// pixelbeat: offline frame simulator for the 64×64 animations.
//
// This binary wires the crates together without any hardware:
//
//   pb-display → SimulatedDisplay framebuffer, PPM/PNG export
//   pb-anim    → ManualClock, Stage, the animations
//
// One animation plays for a fixed number of frames. Each frame the manual
// clock moves forward by one tick and the stage updates and renders:
//
//   clock.advance → stage.tick → update → render → framebuffer
//                                                      │
//                             every N-th frame → {out}/{token}_{frame:04}.{ext}

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use pb_anim::{AnimationKind, ManualClock, SharedClock, Stage};
use pb_display::{FrameFormat, SharedDisplay, SimulatedDisplay, share};

const WIDTH: i32 = 64;
const HEIGHT: i32 = 64;

/// Render an animation offline and write its frames to disk.
#[derive(Debug, Parser)]
#[clap(name = "pixelbeat", version, about)]
struct Args {
    /// Animation to play (val1..val5, egg, chick1, mosq1 or an alias)
    #[clap(value_parser, env = "PIXELBEAT_ANIM", default_value = "val4")]
    animation: AnimationKind,

    /// Number of frames to simulate
    #[clap(short, long, value_parser, env = "PIXELBEAT_FRAMES", default_value_t = 240)]
    frames: u32,

    /// Write every N-th frame
    #[clap(short, long, value_parser, env = "PIXELBEAT_EVERY", default_value_t = 3)]
    every: u32,

    /// Simulated milliseconds per frame
    #[clap(long, value_parser, env = "PIXELBEAT_TICK_MS", default_value_t = 33)]
    tick_ms: u64,

    /// Output pixels per logical pixel
    #[clap(short, long, value_parser, env = "PIXELBEAT_SCALE", default_value_t = 8)]
    scale: u32,

    /// Output directory
    #[clap(short, long, value_parser, env = "PIXELBEAT_OUT", default_value = "sim_frames")]
    out: PathBuf,

    /// Frame file format (ppm or png)
    #[clap(long, value_parser, env = "PIXELBEAT_FORMAT", default_value = "ppm")]
    format: FrameFormat,

    /// Seed for star placement
    #[clap(long, value_parser, env = "PIXELBEAT_SEED", default_value_t = 12345)]
    seed: u64,
}

impl Args {
    fn frame_path(&self, frame: u32) -> PathBuf {
        let name = format!(
            "{}_{frame:04}.{}",
            self.animation.token(),
            self.format.extension()
        );
        self.out.join(name)
    }
}

/// Run the simulation and return how many frames were written.
fn simulate(args: &Args) -> Result<usize> {
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let clock = Rc::new(ManualClock::new(0));
    let display = share(SimulatedDisplay::new(WIDTH, HEIGHT, args.scale.max(1)));

    let shared_clock: SharedClock = clock.clone();
    let shared_display: SharedDisplay = display.clone();
    let mut stage = Stage::new(shared_clock, shared_display, args.seed);
    stage.play(args.animation);

    let every = args.every.max(1);
    let mut written = 0;

    for frame in 0..args.frames {
        stage.tick();

        if frame % every == 0 {
            let path = args.frame_path(frame);
            display
                .borrow()
                .save_frame_as(&path, args.format)
                .with_context(|| format!("writing frame {}", path.display()))?;
            written += 1;
        }

        clock.advance(args.tick_ms);
    }

    log::debug!("{stage:?} after {} frames", args.frames);
    Ok(written)
}

fn run(args: &Args) -> Result<()> {
    let written = simulate(args)?;
    println!(
        "Simulation complete for {}. {written} frames written to {}",
        args.animation.token(),
        display_dir(&args.out)
    );
    Ok(())
}

fn display_dir(path: &Path) -> String {
    if path.is_relative() {
        format!("./{}", path.display())
    } else {
        path.display().to_string()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
