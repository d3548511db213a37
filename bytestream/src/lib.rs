//! Big-endian byte sink and source primitives for the graphpack codec.
//!
//! This crate provides the [`ByteSink`] and [`ByteSource`] capabilities the
//! codec writes to and reads from, plus in-memory ([`ByteWriter`],
//! [`ByteReader`]) and `std::io` adapters ([`IoSink`], [`IoSource`]).
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about tags, types, or registries.
//! - **Explicit errors** - All failures return structured errors, never panic.
//! - **Fixed endianness** - Every multi-byte value is big-endian.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteSink, ByteSource, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_i16(-2).unwrap();
//! writer.write_utf("point").unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_i16().unwrap(), -2);
//! assert_eq!(reader.read_utf().unwrap(), "point");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::{ByteReader, ByteSource, IoSource};
pub use writer::{ByteSink, ByteWriter, IoSink};

/// Maximum UTF-8 length of a string behind a 16-bit length prefix.
pub const MAX_UTF_LEN: usize = u16::MAX as usize;
