use std::io;

#[derive(thiserror::Error, Debug)]
pub enum StreamError {
    /// Failure reported by the underlying channel (short read, closed, fault).
    /// Passed through unchanged; the codec performs no retry or recovery.
    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// Text bytes on the wire were not valid UTF-8. The wire format itself is
    /// byte-oriented; this only arises when decoding into a Rust `String`,
    /// e.g. after the write-side byte truncation split a multibyte character.
    #[error("utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
