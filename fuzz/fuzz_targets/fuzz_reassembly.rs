#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serjson::{Parser, ParserOptions, Reassembler, ReassemblyOptions, split_by_seeds};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    /// Carry-over size for the split run; `0` means "as large as the text".
    capacity: u8,
    max_depth: u8,
    seeds: Vec<u16>,
    text: &'a [u8],
}

fn run(chunks: &[&[u8]], capacity: usize, max_depth: usize) -> Option<serjson::Value> {
    let mut r = Reassembler::new(ReassemblyOptions { capacity });
    for chunk in chunks {
        if r.push(chunk).is_err() {
            return None;
        }
    }
    if !r.take_failures().is_empty() {
        return None;
    }
    let mut tokens = r.finish_message();
    let value = Parser::new(ParserOptions { max_depth }).parse(&mut tokens);
    // Rendering must never panic, whatever shape came out.
    let _ = value.to_string();
    Some(value)
}

fuzz_target!(|input: Input<'_>| {
    if input.text.is_empty() {
        return;
    }
    let seeds: Vec<usize> = input.seeds.iter().map(|&s| usize::from(s)).collect();
    let chunks = split_by_seeds(input.text, &seeds);
    let max_depth = usize::from(input.max_depth);

    let capacity = match input.capacity {
        0 => input.text.len(),
        n => usize::from(n),
    };
    let split = run(&chunks, capacity, max_depth);

    // A single read that fits the buffer is the reference result.
    let whole = run(&[input.text], input.text.len(), max_depth);
    if let (Some(split), Some(whole)) = (split, whole) {
        assert_eq!(split, whole, "chunking changed the parse of {:?}", input.text);
    }
});
