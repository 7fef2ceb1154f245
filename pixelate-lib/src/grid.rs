use crate::*;

/// Square blocks laid over a `width` x `height` image, clipped at the
/// right and bottom edges.
///
/// Blocks never overlap and together cover every pixel exactly once; the
/// parallel path relies on this to hand out exclusive views without locks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    width: u32,
    height: u32,
    block_size: u32,
}

impl BlockGrid {
    pub fn new(width: u32, height: u32, block_size: u32) -> Result<Self, Error> {
        for &(name, value) in [("width", width), ("height", height), ("block size", block_size)].iter() {
            if value == 0 {
                return Err(Error::InvalidDimension { name });
            }
        }

        Ok(Self {
            width,
            height,
            block_size,
        })
    }

    pub fn for_image(img: &RgbImage, block_size: u32) -> Result<Self, Error> {
        Self::new(img.width(), img.height(), block_size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn xblocks(&self) -> u32 {
        self.width.div_ceil(self.block_size)
    }

    pub fn yblocks(&self) -> u32 {
        self.height.div_ceil(self.block_size)
    }

    pub fn len(&self) -> usize {
        (self.xblocks() as usize) * (self.yblocks() as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn block_x0(&self, bx: u32) -> u32 {
        bx * self.block_size
    }

    pub fn block_x1(&self, bx: u32) -> u32 {
        self.block_x0(bx).saturating_add(self.block_size).min(self.width)
    }

    pub fn block_y0(&self, by: u32) -> u32 {
        by * self.block_size
    }

    pub fn block_y1(&self, by: u32) -> u32 {
        self.block_y0(by).saturating_add(self.block_size).min(self.height)
    }

    pub fn block(&self, bx: u32, by: u32) -> Block {
        Block::new(
            self.block_x0(bx),
            self.block_y0(by),
            self.block_x1(bx),
            self.block_y1(by),
        )
    }

    /// Yields blocks band by band: every block of the first `block_size`
    /// rows, left to right, then the next band.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        (0..self.yblocks()).flat_map(move |by| (0..self.xblocks()).map(move |bx| self.block(bx, by)))
    }
}
