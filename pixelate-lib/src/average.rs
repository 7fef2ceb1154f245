use crate::*;

/// Running per-channel sum of the pixels seen so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Average {
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl Average {
    pub fn push(&mut self, color: Rgb<u8>) {
        let [r, g, b] = color.0;

        self.red += r as u64;
        self.green += g as u64;
        self.blue += b as u64;
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Truncating (floor) mean of each channel.
    pub fn finish(&self) -> Result<Rgb<u8>, Error> {
        if self.count == 0 {
            return Err(Error::EmptyBlock);
        }

        Ok(Rgb([
            (self.red / self.count) as u8,
            (self.green / self.count) as u8,
            (self.blue / self.count) as u8,
        ]))
    }
}

impl Extend<Rgb<u8>> for Average {
    fn extend<I: IntoIterator<Item = Rgb<u8>>>(&mut self, iter: I) {
        for color in iter {
            self.push(color);
        }
    }
}

/// Replaces every pixel of `block` with the block's average color and
/// returns that color.
pub fn apply_block_average<C>(canvas: &mut C, block: &Block) -> Result<Rgb<u8>, Error>
where
    C: Canvas + ?Sized,
{
    let mut average = Average::default();

    for (x, y) in block.pixels() {
        average.push(canvas.read(x, y)?);
    }

    let color = average.finish()?;

    for (x, y) in block.pixels() {
        canvas.write(x, y, color)?;
    }

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_instead_of_rounding() {
        let mut img = RgbImage::from_raw(
            2,
            2,
            vec![0, 0, 0, 255, 255, 255, 0, 0, 0, 255, 255, 255],
        )
        .unwrap();

        let color = apply_block_average(&mut img, &Block::new(0, 0, 2, 2)).unwrap();

        assert_eq!(Rgb([127, 127, 127]), color);
        assert!(img.pixels().all(|p| *p == Rgb([127, 127, 127])));
    }

    #[test]
    fn averages_channels_independently() {
        let mut average = Average::default();

        average.extend(vec![Rgb([10, 0, 255]), Rgb([20, 1, 0]), Rgb([31, 1, 0])]);

        assert_eq!(3, average.count());
        assert_eq!(Ok(Rgb([20, 0, 85])), average.finish());
    }

    #[test]
    fn empty_average_is_an_error() {
        assert_eq!(Err(Error::EmptyBlock), Average::default().finish());
    }

    #[test]
    fn touches_only_the_given_block() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]));

        img.put_pixel(0, 0, Rgb([1, 2, 3]));
        img.put_pixel(1, 1, Rgb([5, 6, 7]));

        apply_block_average(&mut img, &Block::new(0, 0, 2, 2)).unwrap();

        assert_eq!(Rgb([6, 6, 7]), *img.get_pixel(0, 0));
        assert_eq!(Rgb([6, 6, 7]), *img.get_pixel(1, 1));
        assert_eq!(Rgb([9, 9, 9]), *img.get_pixel(2, 0));
        assert_eq!(Rgb([9, 9, 9]), *img.get_pixel(0, 2));
    }

    #[test]
    fn reapplying_is_idempotent() {
        let mut img = RgbImage::from_fn(3, 3, |x, y| Rgb([(x * 40) as u8, (y * 70) as u8, 200]));
        let block = Block::new(0, 0, 3, 3);

        let first = apply_block_average(&mut img, &block).unwrap();
        let snapshot = img.clone();
        let second = apply_block_average(&mut img, &block).unwrap();

        assert_eq!(first, second);
        assert_eq!(snapshot, img);
    }

    #[test]
    fn block_outside_image_faults() {
        let mut img = RgbImage::new(2, 2);

        assert_eq!(
            Err(Error::PixelAccessFault {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }),
            apply_block_average(&mut img, &Block::new(0, 0, 3, 1))
        );
    }
}
