const MSB_MASK: u64 = 0x8080_8080_8080_8080;
const LSB_MASK: u64 = 0x0101_0101_0101_0101;
const SEMICOLON_BCAST: u64 = LSB_MASK * (b';' as u64);
const NEWLINE_BCAST: u64 = LSB_MASK * (b'\n' as u64);

/// The record loop works in windows of at most this many bytes, so both
/// delimiter masks fit a `u32`.
pub const WINDOW: usize = 32;

// Zero bytes of `word ^ bcast` get their high bit set, every other byte
// comes out with the high bit clear.
#[inline(always)]
fn match_mask(word: u64, bcast: u64) -> u64 {
    let x = word ^ bcast;
    x.wrapping_sub(LSB_MASK) & !x & MSB_MASK
}

pub trait DelimiterScan {
    /// Index of the first occurrence of `needle`, eight bytes per step.
    fn byte_position(&self, needle: u8) -> Option<usize>;

    /// `(semicolons, newlines)` bitmasks over the first [`WINDOW`] bytes:
    /// bit `i` is set when byte `i` is the delimiter.
    fn delimiter_masks(&self) -> (u32, u32);
}

impl DelimiterScan for [u8] {
    #[inline(always)]
    fn byte_position(&self, needle: u8) -> Option<usize> {
        let bcast = LSB_MASK * needle as u64;

        let mut i = 0;
        while i + 8 <= self.len() {
            let word = u64::from_ne_bytes(self[i..i + 8].try_into().unwrap());
            let hits = match_mask(word, bcast);
            if hits != 0 {
                return Some(i + (hits.trailing_zeros() / 8) as usize);
            }
            i += 8;
        }

        self[i..].iter().position(|&b| b == needle).map(|j| i + j)
    }

    #[inline(always)]
    fn delimiter_masks(&self) -> (u32, u32) {
        let len = self.len().min(WINDOW);

        let mut semicolons = 0u32;
        let mut newlines = 0u32;

        let mut i = 0;
        while i + 8 <= len {
            let word = u64::from_ne_bytes(self[i..i + 8].try_into().unwrap());

            let mut semi_hits = match_mask(word, SEMICOLON_BCAST);
            let mut nl_hits = match_mask(word, NEWLINE_BCAST);

            while semi_hits != 0 {
                semicolons |= 1u32 << (semi_hits.trailing_zeros() / 8 + i as u32);
                semi_hits &= semi_hits - 1;
            }
            while nl_hits != 0 {
                newlines |= 1u32 << (nl_hits.trailing_zeros() / 8 + i as u32);
                nl_hits &= nl_hits - 1;
            }

            i += 8;
        }

        while i < len {
            match self[i] {
                b';' => semicolons |= 1u32 << i,
                b'\n' => newlines |= 1u32 << i,
                _ => {}
            }
            i += 1;
        }

        (semicolons, newlines)
    }
}
