// --- File: mask.rs ---
//! Bitmap collision masks.
//!
//! A mask stores one bit per pixel, row-major, packed into `u64` words. Two masks
//! collide when at least one set bit of each lands on the same pixel once the second
//! mask is shifted by an integer offset.

use glam::IVec2;

const WORD_BITS: u32 = u64::BITS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Empty (fully transparent) mask.
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS) as usize;
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Builds a mask by asking `solid` about every pixel.
    pub fn from_fn(width: u32, height: u32, solid: impl Fn(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    #[inline]
    fn word_index(&self, x: u32, y: u32) -> (usize, u32) {
        let word = y as usize * self.words_per_row + (x / WORD_BITS) as usize;
        (word, x % WORD_BITS)
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= self.width || y >= self.height {
            log::warn!(
                "Ignoring mask write at ({}, {}) outside {}x{}",
                x,
                y,
                self.width,
                self.height
            );
            return;
        }
        let (word, bit) = self.word_index(x, y);
        if value {
            self.bits[word] |= 1 << bit;
        } else {
            self.bits[word] &= !(1 << bit);
        }
    }

    /// Pixels outside the mask read as empty.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        let (word, bit) = self.word_index(x as u32, y as u32);
        self.bits[word] & (1 << bit) != 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of set pixels.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|word| word.count_ones()).sum()
    }

    /// Upside-down copy; rows are whole word runs so this is a row swap.
    pub fn flipped_vertical(&self) -> Self {
        let mut flipped = Self::new(self.width, self.height);
        for (dst_row, src_row) in flipped
            .bits
            .chunks_mut(self.words_per_row.max(1))
            .zip(self.bits.chunks(self.words_per_row.max(1)).rev())
        {
            dst_row.copy_from_slice(src_row);
        }
        flipped
    }

    /// First pixel (in this mask's coordinates, row by row) where `other`, placed at
    /// `offset` relative to this mask, overlaps a set bit of this mask.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (self.width as i32).min(offset.x + other.width as i32);
        let y_end = (self.height as i32).min(offset.y + other.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }

    #[inline]
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        self.overlap(other, offset).is_some()
    }
}
