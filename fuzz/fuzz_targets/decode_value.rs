#![no_main]

use codec::{Codec, CodecLimits};
use libfuzzer_sys::fuzz_target;
use schema::{FieldDescriptor, FieldType, TypeDescriptor};

fn codec() -> Codec {
    let types = vec![
        TypeDescriptor::class("Point")
            .serializable()
            .field(FieldDescriptor::new("x", FieldType::INT))
            .field(FieldDescriptor::new("y", FieldType::INT)),
        TypeDescriptor::class("Light")
            .serializable()
            .field(FieldDescriptor::new("color", FieldType::enumeration("Color"))),
        TypeDescriptor::class("Node")
            .serializable()
            .field(FieldDescriptor::new("children", FieldType::List))
            .field(FieldDescriptor::new("payload", FieldType::Any)),
        TypeDescriptor::interface("Shape").serializable(),
    ];
    Codec::with_limits(types, CodecLimits::for_testing()).unwrap()
}

fuzz_target!(|data: &[u8]| {
    let codec = codec();
    if let Ok(value) = codec.decode(data) {
        // Multi-char strings decoded as chars and class arrays whose first
        // element differs from the recorded name re-encode differently.
        let _ = codec.encode(&value);
    }
});
