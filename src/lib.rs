//! `minibuf`: a minimal length-prefixed binary stream codec.
//!
//! A [`Stream`] wraps any byte channel (`std::io::Read`/`Write`) and frames
//! fixed-width scalars and length-prefixed text through it; [`Serializable`]
//! lets composite records encode themselves recursively. The format is a flat
//! byte stream with no self-describing schema: both sides must agree
//! out-of-band on field order and types.
//!
//! Wire format, all multi-byte fields in host-native byte order:
//!
//! | value           | encoding |
//! |-----------------|----------|
//! | scalar `T`      | raw `size_of::<T>()` bytes |
//! | text            | `u16` length `n`, then `n` raw bytes; `0xFFFF` = absent |
//! | collection      | `u32` count, then the elements; `0xFFFF_FFFF` = absent |

mod error;
mod scalar;
mod serialize;
mod stream;

pub use crate::error::StreamError;
pub use crate::scalar::Scalar;
pub use crate::serialize::Serializable;
pub use crate::stream::{Stream, DEFAULT_SCRATCH_CAPACITY, MAX_TEXT_LEN};
