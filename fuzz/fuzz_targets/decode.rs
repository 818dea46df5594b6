#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;

fuzz_target!(|data: &[u8]| {
    if let Ok(decoded) = huffpack::decode(data) {
        let artifact = huffpack::encode(&decoded);
        assert_eq!(huffpack::decode(&artifact).unwrap(), decoded);
    }
});
