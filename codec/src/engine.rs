//! The codec entry points.

use bytestream::{ByteReader, ByteSink, ByteSource};
use schema::{registry_hash, simple_name, TypeDescriptor, TypeRegistry};

use crate::convert::Composite;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{CodecError, CodecResult, MalformedReason};
use crate::limits::CodecLimits;
use crate::scratch::CodecScratch;
use crate::value::{Object, Value};

/// Encodes and decodes value graphs against a fixed type registry.
///
/// Both peers must build the codec from the same set of types; the registry
/// index of each type is its wire discriminator.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: TypeRegistry,
    limits: CodecLimits,
}

impl Codec {
    /// Builds the registry from `types` and uses default limits.
    pub fn new(types: Vec<TypeDescriptor>) -> CodecResult<Self> {
        Ok(Self::from_registry(TypeRegistry::new(types)?))
    }

    /// Builds the registry from `types` with explicit limits.
    pub fn with_limits(types: Vec<TypeDescriptor>, limits: CodecLimits) -> CodecResult<Self> {
        let mut codec = Self::from_registry(TypeRegistry::new(types)?);
        codec.limits = limits;
        Ok(codec)
    }

    /// Wraps an already-built registry.
    #[must_use]
    pub fn from_registry(registry: TypeRegistry) -> Self {
        tracing::debug!(
            types = registry.len(),
            fingerprint = registry_hash(&registry),
            "codec ready"
        );
        Self {
            registry,
            limits: CodecLimits::default(),
        }
    }

    /// Replaces the limits used by later calls.
    pub fn set_limits(&mut self, limits: CodecLimits) {
        self.limits = limits;
    }

    #[must_use]
    pub const fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Encodes a value into a new buffer.
    pub fn encode(&self, value: &Value) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Encodes a value into any sink.
    ///
    /// On error, bytes already written stay in the sink.
    pub fn encode_into<S: ByteSink>(&self, value: &Value, sink: &mut S) -> CodecResult<()> {
        Encoder::new(&self.registry, &self.limits, sink).write_value(value)
    }

    /// Encodes a value into a reusable buffer and returns the written bytes.
    pub fn encode_with_scratch<'s>(
        &self,
        value: &Value,
        scratch: &'s mut CodecScratch,
    ) -> CodecResult<&'s [u8]> {
        self.encode_into(value, scratch.cleared())?;
        Ok(scratch.as_slice())
    }

    /// Decodes exactly one value spanning the whole buffer.
    pub fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        let mut reader = ByteReader::new(bytes);
        let value = self.decode_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(CodecError::Malformed(MalformedReason::TrailingBytes {
                remaining: reader.bytes_remaining(),
            }));
        }
        Ok(value)
    }

    /// Decodes one value, leaving the source positioned right after it.
    pub fn decode_from<S: ByteSource>(&self, source: &mut S) -> CodecResult<Value> {
        Decoder::new(&self.registry, &self.limits, source).read_value()
    }

    /// Encodes a user type through its object form.
    pub fn encode_composite<T: Composite>(&self, value: &T) -> CodecResult<Vec<u8>> {
        self.encode(&Value::Object(value.to_object()))
    }

    /// Decodes a user type from a buffer holding one of its objects.
    ///
    /// The decoded object must be of `T`'s registered type.
    pub fn decode_composite<T: Composite>(&self, bytes: &[u8]) -> CodecResult<T> {
        let object = Object::try_from(self.decode(bytes)?)?;
        let expected = T::descriptor();
        if simple_name(object.type_name()) != expected.simple_name() {
            return Err(CodecError::mismatch(&expected.name, object.type_name()));
        }
        T::from_object(object)
    }
}
