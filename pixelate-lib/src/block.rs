/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Block {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        debug_assert!(x0 <= x1 && y0 <= y1);

        Self { x0, y0, x1, y1 }
    }

    pub fn x0(&self) -> u32 {
        self.x0
    }

    pub fn y0(&self) -> u32 {
        self.y0
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> u64 {
        (self.width() as u64) * (self.height() as u64)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }

    /// Row-major coordinates of every pixel inside the block.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, x1) = (self.x0, self.x1);

        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_row_major() {
        let block = Block::new(2, 5, 4, 7);
        let pixels: Vec<_> = block.pixels().collect();

        assert_eq!(vec![(2, 5), (3, 5), (2, 6), (3, 6)], pixels);
        assert_eq!(4, block.area());
    }

    #[test]
    fn contains_is_half_open() {
        let block = Block::new(0, 0, 2, 3);

        assert!(block.contains(0, 0));
        assert!(block.contains(1, 2));
        assert!(!block.contains(2, 0));
        assert!(!block.contains(0, 3));
    }
}
