#![no_main]

use bytestream::{ByteReader, ByteSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 8;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_i8();
            }
            1 => {
                let _ = reader.read_i16();
            }
            2 => {
                let _ = reader.read_i32();
            }
            3 => {
                let _ = reader.read_i64();
            }
            4 => {
                let _ = reader.read_f32();
            }
            5 => {
                let _ = reader.read_f64();
            }
            6 => {
                let _ = reader.read_utf();
            }
            _ => {
                let len = usize::from(data[idx.saturating_sub(1)] % 16);
                let _ = reader.read_slice(len);
            }
        }
    }
});
