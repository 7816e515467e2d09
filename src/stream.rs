//! The stream wrapper: scalar framing, text framing, and the scratch buffer.
//!
//! All multi-byte values travel in the host's native byte order with no
//! alignment padding. The wire carries no schema: producer and consumer must
//! issue mirrored sequences of typed calls.

use std::io::{Read, Write};

use crate::error::StreamError;
use crate::scalar::Scalar;

/// Default scratch buffer capacity for [`Stream::new`].
pub const DEFAULT_SCRATCH_CAPACITY: usize = 256;

/// Longest encodable text, in bytes. `0xFFFF` is reserved as the absent
/// sentinel, so the 2-byte length field tops out one below it.
pub const MAX_TEXT_LEN: usize = 0xFFFE;

/// Length sentinel marking "no string" (distinct from an empty string).
const ABSENT_TEXT: u16 = 0xFFFF;

/// Count sentinel marking an absent collection.
const ABSENT_COUNT: u32 = 0xFFFF_FFFF;

/// Scratch growth granularity for large requests.
const PAGE_SIZE: usize = 4 << 10;

/// Largest `Scalar::SIZE` the stack transfer buffer accommodates.
const MAX_SCALAR_SIZE: usize = 8;

/// A typed framing layer over a byte channel.
///
/// `C` is any [`Read`] and/or [`Write`] resource. The stream never closes the
/// channel; pass `&mut channel` to keep ownership at the call site, or
/// reclaim an owned channel with [`Stream::into_inner`].
///
/// Not safe for concurrent use: every variable-length read mutates the
/// scratch buffer in place.
pub struct Stream<C> {
    channel: C,
    /// Transient storage for inbound variable-length reads. Grows per
    /// [`Stream::ensure_scratch`], never shrinks; contents are meaningless
    /// between reads.
    scratch: Vec<u8>,
}

impl<C> Stream<C> {
    /// Wrap `channel` with the default scratch capacity (256 bytes).
    pub fn new(channel: C) -> Self {
        Self::with_capacity(channel, DEFAULT_SCRATCH_CAPACITY)
    }

    /// Wrap `channel` with an explicit initial scratch capacity.
    pub fn with_capacity(channel: C, capacity: usize) -> Self {
        Self {
            channel,
            scratch: vec![0; capacity],
        }
    }

    /// Current scratch capacity in bytes. Only ever grows; after a read of
    /// `n` bytes this is always ≥ `n`.
    pub fn capacity(&self) -> usize {
        self.scratch.len()
    }

    pub fn get_ref(&self) -> &C {
        &self.channel
    }

    pub fn get_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Release the channel without closing it.
    pub fn into_inner(self) -> C {
        self.channel
    }

    /// Make the scratch buffer hold at least `size` bytes.
    ///
    /// Requests at or above 4 KiB round up to the next 4 KiB multiple;
    /// smaller requests double the current capacity once, clamped up to the
    /// request when one doubling is not enough to fit it. Kept deliberately
    /// simple for the bounded 16-bit length domain this codec frames; it is
    /// not a general-purpose growth strategy. Growth reallocates and discards
    /// previous contents, which only ever span one read.
    fn ensure_scratch(&mut self, size: usize) {
        if size <= self.scratch.len() {
            return;
        }
        let grown = if size >= PAGE_SIZE {
            size.div_ceil(PAGE_SIZE) * PAGE_SIZE
        } else {
            (self.scratch.len() << 1).max(size)
        };
        self.scratch = vec![0; grown];
    }
}

impl<C: Write> Stream<C> {
    /// Write one fixed-width scalar: exactly `T::SIZE` raw bytes, native
    /// byte order, no length prefix, no type tag.
    pub fn write<T: Scalar>(&mut self, value: T) -> Result<(), StreamError> {
        let mut buf = [0u8; MAX_SCALAR_SIZE];
        value.encode(&mut buf);
        self.channel.write_all(&buf[..T::SIZE])?;
        Ok(())
    }

    /// Write text as a 2-byte length followed by that many raw bytes.
    ///
    /// Anything longer than [`MAX_TEXT_LEN`] is silently truncated to its
    /// first 65534 bytes. Truncation counts bytes, not characters, and can
    /// split a multibyte UTF-8 sequence; decoding such a stream fails with
    /// [`StreamError::Utf8`]. This flavor never emits the absent sentinel.
    pub fn write_str(&mut self, text: &str) -> Result<(), StreamError> {
        let n = text.len().min(MAX_TEXT_LEN);
        self.write(n as u16)?;
        self.channel.write_all(&text.as_bytes()[..n])?;
        Ok(())
    }

    /// Nullable flavor of [`Stream::write_str`]: `None` is framed as the
    /// length sentinel `0xFFFF` with zero content bytes, which decodes as
    /// "no string", distinct from an empty string.
    pub fn write_opt_str(&mut self, text: Option<&str>) -> Result<(), StreamError> {
        match text {
            None => self.write(ABSENT_TEXT),
            Some(s) => self.write_str(s),
        }
    }

    /// Write a collection count, where `None` marks an absent collection.
    ///
    /// `Some(n)` requires `n < 0xFFFF_FFFF`; the sentinel value itself is not
    /// an encodable count.
    pub fn write_count(&mut self, count: Option<u32>) -> Result<(), StreamError> {
        match count {
            None => self.write(ABSENT_COUNT),
            Some(n) => {
                debug_assert!(n < ABSENT_COUNT, "count collides with the absent sentinel");
                self.write(n)
            }
        }
    }

    /// Flush the underlying channel.
    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.channel.flush()?;
        Ok(())
    }
}

impl<C: Read> Stream<C> {
    /// Read one fixed-width scalar: exactly `T::SIZE` bytes. An exhausted
    /// channel surfaces as the channel's own error (`UnexpectedEof` from
    /// `read_exact`); the codec adds no checking on top.
    pub fn read<T: Scalar>(&mut self) -> Result<T, StreamError> {
        let mut buf = [0u8; MAX_SCALAR_SIZE];
        self.channel.read_exact(&mut buf[..T::SIZE])?;
        Ok(T::decode(&buf))
    }

    /// Read a length-prefixed text value.
    ///
    /// Both a zero length and the absent sentinel decode to an empty string
    /// here; this flavor cannot represent absence, so the distinction is
    /// lost. Use [`Stream::read_opt_string`] when it matters. Neither case
    /// carries content bytes on the wire, so exactly 2 bytes are consumed.
    pub fn read_string(&mut self) -> Result<String, StreamError> {
        let n = self.read::<u16>()?;
        if n == 0 || n == ABSENT_TEXT {
            return Ok(String::new());
        }
        self.read_text(n as usize)
    }

    /// Nullable flavor of [`Stream::read_string`]: the absent sentinel
    /// decodes to `None`, a zero length to `Some("")`.
    pub fn read_opt_string(&mut self) -> Result<Option<String>, StreamError> {
        let n = self.read::<u16>()?;
        if n == ABSENT_TEXT {
            return Ok(None);
        }
        if n == 0 {
            return Ok(Some(String::new()));
        }
        self.read_text(n as usize).map(Some)
    }

    /// Read a collection count written by [`Stream::write_count`].
    pub fn read_count(&mut self) -> Result<Option<u32>, StreamError> {
        Ok(match self.read::<u32>()? {
            ABSENT_COUNT => None,
            n => Some(n),
        })
    }

    fn read_text(&mut self, n: usize) -> Result<String, StreamError> {
        self.ensure_scratch(n);
        self.channel.read_exact(&mut self.scratch[..n])?;
        Ok(String::from_utf8(self.scratch[..n].to_vec())?)
    }
}
