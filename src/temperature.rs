// Digit bytes 0x30-0x39 all carry bit 0x10; the decimal point (0x2E) does
// not, so `!word & DOT_BITS` isolates the point among the four layouts
// `d.d`, `dd.d`, `-d.d`, `-dd.d`.
const DOT_BITS: u64 = 0x10101000;

// Collapses the three aligned digit nibbles into `100h + 10t + u`.
const MAGIC_MULTIPLIER: u64 = 100 * 0x1000000 + 10 * 0x10000 + 1;

/// Branch-free decode of `-?\d{1,2}\.\d` into scaled tenths.
///
/// Loads a full 8-byte word starting at `bytes[0]`; the caller must
/// guarantee eight readable bytes from there. Records at the very end of
/// a region go through [`decode_tail`] instead.
#[inline(always)]
pub fn decode(bytes: &[u8]) -> i16 {
    let n = unsafe { (bytes.as_ptr() as *const u64).read_unaligned() };
    let n = n & ((1u64 << (bytes.len() * 8)) - 1);

    let dot = (!n & DOT_BITS).trailing_zeros();
    let sign = (((!n) << 59) as i64 >> 63) as u64;
    let mask = !(sign & 0xff);
    let digits = ((n & mask) << (28 - dot)) & 0xf000f0f00;
    let abs = (digits.wrapping_mul(MAGIC_MULTIPLIER) >> 32) & 0x3ff;
    ((abs ^ sign).wrapping_sub(sign)) as i16
}

/// Byte-at-a-time decode for the last records of a region, where the word
/// load of [`decode`] would run past the mapping.
pub fn decode_tail(bytes: &[u8]) -> i16 {
    match bytes {
        [b'-', rest @ ..] => -decode_tail(rest),
        [d, b'.', f] => ((d - b'0') * 10 + (f - b'0')) as i16,
        [t, d, b'.', f] => (t - b'0') as i16 * 100 + ((d - b'0') * 10 + (f - b'0')) as i16,
        _ => panic!("malformed temperature: {bytes:?}"),
    }
}
