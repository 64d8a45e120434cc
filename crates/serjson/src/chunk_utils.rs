use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized byte chunks.
///
/// Serial reads cut anywhere, including inside a UTF-8 sequence, so unlike a
/// text splitter this one ignores character boundaries.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at sizes derived from `splits`, as a property test or
/// fuzzer would.
///
/// Each split `s` yields a chunk of `1 + s % remaining` bytes; once the
/// splits run out, the remainder becomes the last chunk.
#[must_use]
pub fn split_by_seeds<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(splits.len() + 1);
    let mut rest = payload;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
