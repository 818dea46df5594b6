#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;

fuzz_target!(|data: &[u8]| {
    let artifact = huffpack::encode(data);
    let decoded = huffpack::decode(&artifact).unwrap();
    assert_eq!(data, &decoded[..]);
});
