//! The contract composite records implement to encode themselves through a
//! [`Stream`], plus impls for scalars, strings, and the count-framed
//! collections.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Write};

use crate::error::StreamError;
use crate::stream::Stream;

/// A record that can persist itself through a [`Stream`].
///
/// `serialize` writes the fields in a fixed declared order; `deserialize`
/// reads them back in the identical order, mutating the receiver in place.
/// The two methods must agree exactly on field order, field types, and
/// nested-type handling; the format carries no tags, so a mismatch silently
/// misaligns every subsequent read.
///
/// Nested composition falls out naturally: a field that is itself
/// `Serializable` is handled by calling into its own implementation.
pub trait Serializable {
    fn serialize(&self, encoder: &mut Stream<impl Write>) -> Result<(), StreamError>;

    fn deserialize(&mut self, decoder: &mut Stream<impl Read>) -> Result<(), StreamError>;
}

// A blanket impl over `T: Scalar` would overlap with the String/Vec/HashMap
// impls under the coherence rules, so the scalar impls are enumerated.
macro_rules! impl_serializable_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Serializable for $t {
            fn serialize(&self, encoder: &mut Stream<impl Write>) -> Result<(), StreamError> {
                encoder.write(*self)
            }

            fn deserialize(&mut self, decoder: &mut Stream<impl Read>) -> Result<(), StreamError> {
                *self = decoder.read::<$t>()?;
                Ok(())
            }
        }
    )*};
}

impl_serializable_scalar!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Value-flavor text: decoding collapses the absent sentinel to `""`. Frame
/// the field through [`Stream::write_opt_str`] / [`Stream::read_opt_string`]
/// directly when absence must survive the round trip.
impl Serializable for String {
    fn serialize(&self, encoder: &mut Stream<impl Write>) -> Result<(), StreamError> {
        encoder.write_str(self)
    }

    fn deserialize(&mut self, decoder: &mut Stream<impl Read>) -> Result<(), StreamError> {
        *self = decoder.read_string()?;
        Ok(())
    }
}

/// Count-prefixed sequence. An absent count decodes to an empty vec; the
/// write side always emits a real count.
impl<T: Serializable + Default> Serializable for Vec<T> {
    fn serialize(&self, encoder: &mut Stream<impl Write>) -> Result<(), StreamError> {
        encoder.write_count(Some(self.len() as u32))?;
        for item in self {
            item.serialize(encoder)?;
        }
        Ok(())
    }

    fn deserialize(&mut self, decoder: &mut Stream<impl Read>) -> Result<(), StreamError> {
        self.clear();
        let Some(count) = decoder.read_count()? else {
            return Ok(());
        };
        self.reserve(count as usize);
        for _ in 0..count {
            let mut item = T::default();
            item.deserialize(decoder)?;
            self.push(item);
        }
        Ok(())
    }
}

/// Count-prefixed map, framed as alternating key/value entries. Iteration
/// order on encode is unspecified; decoders must not rely on it.
impl<K, V> Serializable for HashMap<K, V>
where
    K: Serializable + Default + Eq + Hash,
    V: Serializable + Default,
{
    fn serialize(&self, encoder: &mut Stream<impl Write>) -> Result<(), StreamError> {
        encoder.write_count(Some(self.len() as u32))?;
        for (key, value) in self {
            key.serialize(encoder)?;
            value.serialize(encoder)?;
        }
        Ok(())
    }

    fn deserialize(&mut self, decoder: &mut Stream<impl Read>) -> Result<(), StreamError> {
        self.clear();
        let Some(count) = decoder.read_count()? else {
            return Ok(());
        };
        for _ in 0..count {
            let mut key = K::default();
            key.deserialize(decoder)?;
            let mut value = V::default();
            value.deserialize(decoder)?;
            self.insert(key, value);
        }
        Ok(())
    }
}
