mod average;
mod block;
mod canvas;
mod error;
mod grid;
mod mode;
mod source;
mod stats;

pub use ::image::{Rgb, RgbImage};
use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;

pub use self::{average::*, block::*, canvas::*, error::*, grid::*, mode::*, source::*, stats::*};

/// Replaces each square block of an image with the block's average color.
#[derive(Clone, Debug)]
pub struct Pixelator {
    block_size: u32,
    mode: Mode,
    workers: usize,
}

impl Pixelator {
    pub fn new(block_size: u32, mode: Mode) -> Result<Self, Error> {
        if block_size == 0 {
            return Err(Error::InvalidDimension { name: "block size" });
        }

        Ok(Self {
            block_size,
            mode,
            workers: num_cpus::get().max(1),
        })
    }

    /// Overrides the size of the worker pool used in [`Mode::Parallel`].
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Pixelates `img` in place.
    ///
    /// Returns once every block has been written, in either mode. Dimension
    /// errors are reported before the first pixel is touched; an image with
    /// no pixels is left alone.
    pub fn run(&self, img: &mut RgbImage) -> Result<Stats, Error> {
        let started = Instant::now();
        let mut stats = Stats {
            mode: self.mode,
            ..Default::default()
        };

        if img.width() == 0 || img.height() == 0 {
            debug!("image is {}x{}, nothing to do", img.width(), img.height());
            return Ok(stats);
        }

        debug!(
            "building grid: {}x{} image, {}px blocks",
            img.width(),
            img.height(),
            self.block_size
        );

        let grid = BlockGrid::for_image(img, self.block_size)?;

        debug!("processing {} blocks ({})", grid.len(), self.mode);

        stats.workers = match self.mode {
            Mode::Sequential => {
                self.run_sequential(img, &grid)?;
                1
            }
            Mode::Parallel => {
                self.run_parallel(img, &grid)?;
                self.workers
            }
        };

        stats.blocks = grid.len();
        stats.pixels = (img.width() as u64) * (img.height() as u64);
        stats.elapsed = started.elapsed();

        info!(
            "pixelated {} blocks ({} px) in {:?} using {} worker(s)",
            stats.blocks, stats.pixels, stats.elapsed, stats.workers
        );

        Ok(stats)
    }

    fn run_sequential(&self, img: &mut RgbImage, grid: &BlockGrid) -> Result<(), Error> {
        for block in grid.blocks() {
            apply_block_average(img, &block)?;
        }

        Ok(())
    }

    fn run_parallel(&self, img: &mut RgbImage, grid: &BlockGrid) -> Result<(), Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|idx| format!("pixelate-{}", idx))
            .build()
            .map_err(|err| Error::ThreadPool(err.to_string()))?;

        let views = split_blocks(img, grid)?;

        dispatch(&pool, views, |view| {
            let block = *view.block();

            apply_block_average(view, &block).map(drop)
        })
    }
}

/// Runs `unit` once per view on `pool`.
///
/// `install` returns only after every spawned unit has finished, which is
/// the completion barrier for the whole image. After the first error no new
/// units are started; the ones already running are drained and that error
/// is returned.
fn dispatch<'a, F>(pool: &ThreadPool, views: Vec<BlockView<'a>>, unit: F) -> Result<(), Error>
where
    F: Fn(&mut BlockView<'a>) -> Result<(), Error> + Sync,
{
    pool.install(|| views.into_par_iter().try_for_each(|mut view| unit(&mut view)))
}
