use crate::*;
use std::mem;

const CHANNELS: usize = 3;

/// Random-access RGB pixels addressed in image coordinates.
pub trait Canvas {
    fn dimensions(&self) -> (u32, u32);

    fn read(&self, x: u32, y: u32) -> Result<Rgb<u8>, Error>;

    fn write(&mut self, x: u32, y: u32, color: Rgb<u8>) -> Result<(), Error>;
}

impl Canvas for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn read(&self, x: u32, y: u32) -> Result<Rgb<u8>, Error> {
        check_bounds(self, x, y)?;

        Ok(*self.get_pixel(x, y))
    }

    fn write(&mut self, x: u32, y: u32, color: Rgb<u8>) -> Result<(), Error> {
        check_bounds(self, x, y)?;
        self.put_pixel(x, y, color);

        Ok(())
    }
}

fn check_bounds(img: &RgbImage, x: u32, y: u32) -> Result<(), Error> {
    if x < img.width() && y < img.height() {
        Ok(())
    } else {
        Err(Error::PixelAccessFault {
            x,
            y,
            width: img.width(),
            height: img.height(),
        })
    }
}

/// Exclusive access to the pixels of a single block inside a larger image.
///
/// Holds one mutable row slice per block row, so views built by
/// [`split_blocks`] can be sent to different threads at once.
#[derive(Debug)]
pub struct BlockView<'a> {
    block: Block,
    width: u32,
    height: u32,
    rows: Vec<&'a mut [u8]>,
}

impl<'a> BlockView<'a> {
    pub fn block(&self) -> &Block {
        &self.block
    }

    fn offset(&self, x: u32, y: u32) -> Result<(usize, usize), Error> {
        if !self.block.contains(x, y) {
            return Err(Error::PixelAccessFault {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let row = (y - self.block.y0()) as usize;
        let col = (x - self.block.x0()) as usize * CHANNELS;

        Ok((row, col))
    }
}

impl Canvas for BlockView<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read(&self, x: u32, y: u32) -> Result<Rgb<u8>, Error> {
        let (row, col) = self.offset(x, y)?;
        let px = &self.rows[row][col..col + CHANNELS];

        Ok(Rgb([px[0], px[1], px[2]]))
    }

    fn write(&mut self, x: u32, y: u32, color: Rgb<u8>) -> Result<(), Error> {
        let (row, col) = self.offset(x, y)?;

        self.rows[row][col..col + CHANNELS].copy_from_slice(&color.0);

        Ok(())
    }
}

/// Carves `img` into one [`BlockView`] per block of `grid`, in the grid's
/// band order. `grid` must have been built for an image of the same size.
///
/// Each band of rows is split off with `chunks_mut`, and each row of a band
/// is split between the band's blocks with `split_at_mut`, so no two views
/// ever alias the same bytes.
pub fn split_blocks<'a>(img: &'a mut RgbImage, grid: &BlockGrid) -> Result<Vec<BlockView<'a>>, Error> {
    let (width, height) = (img.width(), img.height());

    if (width, height) != (grid.width(), grid.height()) {
        return Err(Error::GridMismatch {
            grid_width: grid.width(),
            grid_height: grid.height(),
            width,
            height,
        });
    }

    let stride = (width as usize) * CHANNELS;
    let band_len = stride.saturating_mul(grid.block_size() as usize);
    let mut views = Vec::with_capacity(grid.len());

    for (by, band) in img.chunks_mut(band_len).enumerate() {
        let first = views.len();

        for bx in 0..grid.xblocks() {
            let block = grid.block(bx, by as u32);

            views.push(BlockView {
                block,
                width,
                height,
                rows: Vec::with_capacity(block.height() as usize),
            });
        }

        for row in band.chunks_mut(stride) {
            let mut rest = row;

            for view in &mut views[first..] {
                let len = (view.block.width() as usize) * CHANNELS;
                let (head, tail) = mem::take(&mut rest).split_at_mut(len);

                view.rows.push(head);
                rest = tail;
            }
        }
    }

    Ok(views)
}
