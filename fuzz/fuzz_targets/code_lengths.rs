#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;
use huffpack::huffman::{CodeTable, SymbolLength};

fuzz_target!(|data: &[u8]| {
    let lengths = data
        .chunks_exact(2)
        .map(|pair| SymbolLength {
            symbol: pair[0],
            length: pair[1],
        })
        .collect::<Vec<_>>();
    if let Ok(table) = CodeTable::from_lengths(lengths) {
        // accepted lengths always give a prefix free code
        let codes = table
            .lengths()
            .iter()
            .map(|entry| table.code(entry.symbol).unwrap())
            .collect::<Vec<_>>();
        for (i, &(code_a, len_a)) in codes.iter().enumerate() {
            for &(code_b, len_b) in &codes[i + 1..] {
                let shared = len_a.min(len_b);
                assert_ne!(code_a >> (len_a - shared), code_b >> (len_b - shared));
            }
        }
    }
});
