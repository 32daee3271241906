//! Command-line interface for weaving a carpet into a PNG file

use crate::algorithm::block::BlockPair;
use crate::algorithm::shuttle::ShuttlePicker;
use crate::io::configuration::{
    DEFAULT_OUTPUT, DEFAULT_PICK_WIDTH, DEFAULT_THREAD_WIDTH, GIF_FRAME_DELAY_MS,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{CarpetRenderer, export_image_as_png};
use crate::io::palette::{Palette, parse_hex_color};
use crate::io::progress::ProgressManager;
use crate::io::visualization::WeavingCapture;
use crate::math::draws::{DrawSource, fresh_seed, seeded};
use crate::spatial::carpet::{Carpet, thread_count};
use crate::spatial::threading::Threading;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "randompicks")]
#[command(
    author,
    version,
    about = "Weave a random overshot carpet from two drifting stripe blocks"
)]
/// Command-line arguments for the carpet generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// PNG file to write
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Random seed for reproducible carpets (fresh seed when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of picks to weave (defaults to one per thread)
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Threading: `short`, `full`, or a comma separated list of 1s and 2s
    #[arg(short, long, default_value = "full", value_parser = Threading::parse)]
    pub threading: Threading,

    /// Width of one thread in pixels
    #[arg(long, default_value_t = DEFAULT_THREAD_WIDTH)]
    pub thread_width: u32,

    /// Height of one pick in pixels
    #[arg(long, default_value_t = DEFAULT_PICK_WIDTH)]
    pub pick_width: u32,

    /// Color of lowered threads as hex, e.g. #e6d98a
    #[arg(long, value_parser = parse_hex_color)]
    pub ground: Option<[u8; 4]>,

    /// Color of raised threads as hex, e.g. #63635c
    #[arg(long, value_parser = parse_hex_color)]
    pub overshot: Option<[u8; 4]>,

    /// Also write an animated GIF of the carpet being woven
    #[arg(short, long)]
    pub visualize: bool,

    /// Print the raised handles of every pick
    #[arg(short, long)]
    pub lift_plan: bool,

    /// Print this many shuttle throws with their random pick counts
    #[arg(long, value_name = "THROWS")]
    pub shuttle_plan: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Overwrite the output even if it exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if an existing output file should be left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Palette built from the defaults and any color overrides
    pub fn palette(&self) -> Palette {
        let defaults = Palette::default();
        Palette {
            ground: self.ground.unwrap_or(defaults.ground),
            overshot: self.overshot.unwrap_or(defaults.overshot),
        }
    }

    /// Number of picks to weave for the given threading
    pub fn row_count(&self) -> usize {
        self.rows
            .unwrap_or_else(|| thread_count(&self.threading, &BlockPair::default()))
    }
}

/// Runs one carpet generation as described by the CLI arguments
pub struct CarpetProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CarpetProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Weave, render and export according to the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if an argument is invalid or an export fails
    // Allow print for user feedback about skipped output and the chosen seed
    #[allow(clippy::print_stderr)]
    pub fn process(&mut self) -> Result<()> {
        if self.cli.skip_existing() && self.cli.output.exists() {
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", self.cli.output.display());
            }
            return Ok(());
        }

        let seed = self.cli.seed.unwrap_or_else(fresh_seed);
        if !self.cli.quiet {
            eprintln!("Weaving with seed {seed}");
        }

        let renderer =
            CarpetRenderer::new(self.cli.thread_width, self.cli.pick_width, self.cli.palette())?;
        let carpet = self.weave(seed)?;

        let image = renderer.paint(&carpet)?;
        export_image_as_png(&image, &self.cli.output)?;

        if self.cli.visualize {
            self.visualize(&carpet, renderer)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if self.cli.lift_plan {
            Self::print_plan(&Self::lift_plan(&carpet));
        }

        if let Some(throws) = self.cli.shuttle_plan {
            let mut rng = seeded(seed);
            Self::print_plan(&Self::shuttle_plan(throws, &mut rng));
        }

        Ok(())
    }

    fn weave(&self, seed: u64) -> Result<Carpet> {
        let start_time = Instant::now();
        let row_count = self.cli.row_count();
        let mut rng = seeded(seed);

        if let Some(ref pm) = self.progress_manager {
            pm.start_stage("weaving", row_count);
        }

        let carpet = Carpet::weave_with_progress(
            &self.cli.threading,
            row_count,
            BlockPair::default(),
            &mut rng,
            |_| {
                if let Some(ref pm) = self.progress_manager {
                    pm.advance();
                }
            },
        )?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish_stage(start_time.elapsed());
        }

        Ok(carpet)
    }

    fn visualize(&self, carpet: &Carpet, renderer: CarpetRenderer) -> Result<()> {
        let start_time = Instant::now();
        let capture = WeavingCapture::new(carpet, renderer);

        if let Some(ref pm) = self.progress_manager {
            let frame_count = capture.frame_schedule(GIF_FRAME_DELAY_MS)?.len();
            pm.start_stage("encoding", frame_count);
        }

        let viz_path = Self::get_visualization_path(&self.cli.output);
        capture.export_gif_with_progress(&viz_path, GIF_FRAME_DELAY_MS, || {
            if let Some(ref pm) = self.progress_manager {
                pm.advance();
            }
        })?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish_stage(start_time.elapsed());
        }

        Ok(())
    }

    /// One line per pick listing the handles to raise
    pub fn lift_plan(carpet: &Carpet) -> Vec<String> {
        carpet
            .states()
            .iter()
            .enumerate()
            .map(|(row, pair)| {
                let handles = pair
                    .raised_handles()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("pick {}: {handles}", row + 1)
            })
            .collect()
    }

    /// One line per throw naming the shuttle and its pick count
    pub fn shuttle_plan(throws: usize, draws: &mut impl DrawSource) -> Vec<String> {
        let mut picker = ShuttlePicker::default();
        (0..throws)
            .map(|_| {
                let (shuttle, picks) = picker.throw(draws);
                format!("shuttle {shuttle}: {picks} picks")
            })
            .collect()
    }

    // Allow print since plans are the requested output
    #[allow(clippy::print_stdout)]
    fn print_plan(lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    /// Path of the animation written next to `output`
    pub fn get_visualization_path(output: &Path) -> PathBuf {
        let stem = output.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = output.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
