// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every cell of a symbol in codeword placement order: two columns at a
/// time from the right edge, alternating upward and downward, right cell of
/// each pair first, skipping the vertical timing column.
pub struct ZigZagIter {
    r: i16,
    // Right column of the current pair
    c: i16,
    width: i16,
    upward: bool,
    // Whether the right cell of the current row has been emitted
    right_done: bool,
}

impl ZigZagIter {
    pub const VERT_TIMING_COL: i16 = 6;

    pub const fn new(width: usize) -> Self {
        let w = width as i16;
        Self { r: w - 1, c: w - 1, width: w, upward: true, right_done: false }
    }
}

impl Iterator for ZigZagIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c <= 0 {
            return None;
        }
        if !self.right_done {
            self.right_done = true;
            return Some((self.r, self.c));
        }

        let res = (self.r, self.c - 1);
        self.right_done = false;
        match self.upward {
            true if self.r > 0 => self.r -= 1,
            false if self.r < self.width - 1 => self.r += 1,
            _ => {
                self.c -= 2;
                if self.c == Self::VERT_TIMING_COL {
                    self.c -= 1;
                }
                self.upward = !self.upward;
            }
        }
        Some(res)
    }
}
