//! Fixed-width scalar encoding.
//!
//! Each supported type gets an explicit byte-copy encode/decode pair in
//! native byte order; no raw-memory reinterpretation anywhere.

/// A fixed-width value the stream can transfer as raw bytes, with no length
/// prefix and no type tag. Producer and consumer must agree on the type
/// out-of-band; the wire carries nothing to detect a mismatch.
pub trait Scalar: Sized + Copy {
    /// Encoded size in bytes. Always equals the in-memory size of the type,
    /// and must not exceed 8 (the stream's stack transfer buffer).
    const SIZE: usize;

    /// Encode into `buf[..Self::SIZE]`.
    fn encode(self, buf: &mut [u8]);

    /// Decode from `buf[..Self::SIZE]`.
    fn decode(buf: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn encode(self, buf: &mut [u8]) {
                buf[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn decode(buf: &[u8]) -> Self {
                let mut b = [0u8; Self::SIZE];
                b.copy_from_slice(&buf[..Self::SIZE]);
                <$t>::from_ne_bytes(b)
            }
        }
    )*};
}

impl_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// One byte on the wire; any nonzero byte decodes as `true`.
impl Scalar for bool {
    const SIZE: usize = 1;

    #[inline]
    fn encode(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }

    #[inline]
    fn decode(buf: &[u8]) -> Self {
        buf[0] != 0
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn sizes_match_memory_layout() {
        assert_eq!(<bool as Scalar>::SIZE, 1);
        assert_eq!(<u16 as Scalar>::SIZE, 2);
        assert_eq!(<i32 as Scalar>::SIZE, 4);
        assert_eq!(<f64 as Scalar>::SIZE, 8);
    }

    #[test]
    fn encode_decode_is_bit_identical() {
        let mut buf = [0u8; 8];
        let v = f64::from_bits(0x7FF8_0000_DEAD_BEEF); // NaN with payload
        v.encode(&mut buf);
        let got = f64::decode(&buf);
        assert_eq!(got.to_bits(), v.to_bits());

        (-12345i32).encode(&mut buf);
        assert_eq!(i32::decode(&buf), -12345);
    }

    #[test]
    fn bool_decodes_any_nonzero_as_true() {
        assert!(bool::decode(&[7]));
        assert!(!bool::decode(&[0]));
    }
}
