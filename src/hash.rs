
/// Polynomial rolling hash (multiplier 257, accumulator seeded with 0) folded
/// into `[0, hash_size)`.
///
/// Arithmetic wraps at 64 bits, so long words hash the same on every platform.
/// The result depends only on the word bytes and `hash_size`.
pub fn word_hash(word: &[u8], hash_size: usize) -> usize {
    let hash = word
        .iter()
        .fold(0u64, |h, &b| h.wrapping_mul(257).wrapping_add(b as u64));
    (hash % hash_size as u64) as usize
}


#[cfg(test)]
mod tests {

    use super::word_hash;

    const HASH_SIZE: usize = 30_000_000;

    #[test]
    fn known_hashes_test() {

        // values computed for a 30M slot table
        let golden: [(&str, usize); 11] = [
            ("cars", 6920873),
            ("bicycle", 15366747),
            ("bicycles", 19254094),
            ("dixon", 7326882),
            ("mountain", 9830891),
            ("considering", 20601749),
            ("martüa", 7438740),
            ("martua", 15767562),
            ("", 0),
            (" ", 32),
            ("8437289hfnkdj0owri3925yrheijfi9yr8932yhfbucndhfjioeqw", 3210550),
        ];

        for (word, expected) in golden {
            assert_eq!(word_hash(word.as_bytes(), HASH_SIZE), expected, "hash of {:?}", word);
        }
    }

    #[test]
    fn pure_and_bounded_test() {
        for size in [1, 7, 1000, HASH_SIZE] {
            for word in ["a", "the", "</s>", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"] {
                let first = word_hash(word.as_bytes(), size);
                assert_eq!(first, word_hash(word.as_bytes(), size));
                assert!(first < size);
            }
        }
    }

}
