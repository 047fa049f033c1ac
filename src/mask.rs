/// Pixel-occupancy masks for exact overlap tests.
///
/// A mask is built once from a sprite's art and never mutated afterwards.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// Fully occupied rectangle.
    #[cfg(test)]
    pub fn filled(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from ASCII art: every non-space glyph becomes a
    /// `cell_w` x `cell_h` block of occupied pixels.
    pub fn from_art(rows: &[&str], cell_w: i32, cell_h: i32) -> Self {
        let (cell_w, cell_h) = (cell_w.max(0), cell_h.max(0));
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let width = cols * cell_w;
        let height = rows.len() as i32 * cell_h;
        let mut bits = vec![false; (width * height) as usize];

        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                if glyph == ' ' {
                    continue;
                }
                let x0 = col as i32 * cell_w;
                let y0 = row as i32 * cell_h;
                for y in y0..y0 + cell_h {
                    let start = (y * width + x0) as usize;
                    bits[start..start + cell_w as usize].fill(true);
                }
            }
        }

        Self { width, height, bits }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether pixel `(x, y)` is occupied.  Out-of-range pixels are empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Number of occupied pixels.
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if `other`, placed at `offset` relative to this mask's origin,
    /// shares at least one occupied pixel with this mask.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;

        // Only the intersection of the two bounding boxes can overlap
        let x_start = dx.max(0);
        let x_end = (dx + other.width).min(self.width);
        let y_start = dy.max(0);
        let y_end = (dy + other.height).min(self.height);
        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        (y_start..y_end).any(|y| {
            (x_start..x_end).any(|x| self.get(x, y) && other.get(x - dx, y - dy))
        })
    }
}
