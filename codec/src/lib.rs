//! Self-describing binary encoding of object graphs.
//!
//! This is the main codec crate that ties together bytestream and schema:
//! every value is written as a 16-bit discriminator followed by its payload.
//! Built-in kinds use a fixed negative table, registered composite types use
//! their index in the [`TypeRegistry`](schema::TypeRegistry).
//!
//! # Features
//!
//! - Scalars, strings, chars, lists, maps, typed arrays and enum ordinals
//! - Composite objects whose fields are written in name order
//! - Streaming reads and writes over any [`ByteSink`](bytestream::ByteSink)
//!   or [`ByteSource`](bytestream::ByteSource)
//! - A [`Composite`] bridge for mapping Rust structs onto registered types
//!
//! # Design Principles
//!
//! - **Registry is the contract** - Peers agree on the type list, never on indices.
//! - **Fail fast** - The first error aborts the call; nothing is rolled back.
//! - **Bounded decoding** - Depth and collection sizes are capped by [`CodecLimits`].
//! - **Deterministic** - The same value always encodes to the same bytes.
//!
//! # Example
//!
//! ```
//! use codec::{Codec, Object, Value};
//! use schema::{FieldDescriptor, FieldType, TypeDescriptor};
//!
//! let codec = Codec::new(vec![TypeDescriptor::class("Point")
//!     .serializable()
//!     .field(FieldDescriptor::new("x", FieldType::INT))
//!     .field(FieldDescriptor::new("y", FieldType::INT))])
//! .unwrap();
//!
//! let point = Value::Object(Object::new("Point").with("x", 3).with("y", 4));
//! let bytes = codec.encode(&point).unwrap();
//! assert_eq!(&bytes[..2], &[0x00, 0x00]);
//! assert_eq!(codec.decode(&bytes).unwrap(), point);
//! ```

mod conform;
mod convert;
mod decode;
mod encode;
mod engine;
mod error;
mod limits;
mod scratch;
mod tag;
mod value;

pub use convert::Composite;
pub use engine::Codec;
pub use error::{CodecError, CodecResult, LimitKind, MalformedReason, TypeRef};
pub use limits::CodecLimits;
pub use scratch::CodecScratch;
pub use tag::Tag;
pub use value::{ArrayValue, ElementType, Object, Value};
