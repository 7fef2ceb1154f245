use crate::Mode;
use std::time::Duration;

/// Summary of a single [`Pixelator::run`](crate::Pixelator::run).
#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub mode: Mode,
    pub blocks: usize,
    pub pixels: u64,
    pub workers: usize,
    pub elapsed: Duration,
}
