//! Huffman codes for hierarchical softmax.
//!
//! The tree is built in linear time by merging two queues: leaves are read
//! from the end of a count-descending order (smallest first) and internal
//! nodes are produced in non-decreasing order, so the two smallest weights are
//! always at the head of one of them. Entries after `</s>` are already in that
//! order after [`Vocab::sort_and_finalize`]; `</s>` itself keeps index 0 and is
//! only slotted in at its count's rank for the merge.

// imports
use crate::error::{Result, Word2VecError};
use crate::vocab::Vocab;

use log::info;


// takes the smaller head of the two queues, leaves lose ties
fn pop_smallest(count: &[u64], leaves_left: &mut usize, next_internal: &mut usize) -> usize {
    if *leaves_left > 0 && count[*leaves_left - 1] < count[*next_internal] {
        *leaves_left -= 1;
        *leaves_left
    } else {
        *next_internal += 1;
        *next_internal - 1
    }
}

// leaf ranks for the merge: entry indices ordered by descending count, with
// `</s>` placed before the first entry of a strictly smaller count
fn leaf_order(vocab: &Vocab) -> Vec<usize> {
    let entries = vocab.entries();
    let sentinel = entries[0].count;
    let rank = entries[1..].iter().take_while(|e| e.count >= sentinel).count();

    let mut order: Vec<usize> = (1..entries.len()).collect();
    order.insert(rank, 0);
    order
}

/// Assigns every entry its `code` (root to leaf) and `path`, the internal node
/// indices visited along that code with `path[0]` the root (`len - 2`).
/// The maximum code length is the one the vocabulary was created with.
pub fn encode(vocab: &mut Vocab) -> Result<()> {

    let n = vocab.len();
    let max_code_len = vocab.max_code_len();
    if n < 2 {
        return Err(Word2VecError::VocabTooSmall { size: n });
    }
    debug_assert!(vocab.entries()[1..].windows(2).all(|w| w[0].count >= w[1].count));

    info!("creating binary tree for {} words", n);

    // leaves are ranks in 0..n, internal nodes in n..2n-1
    let order = leaf_order(vocab);
    let mut count = vec![u64::MAX; 2 * n + 1];
    let mut binary = vec![0u8; 2 * n + 1];
    let mut parent = vec![0usize; 2 * n + 1];
    for (c, &i) in count.iter_mut().zip(&order) {
        *c = vocab.entries()[i].count;
    }

    let mut leaves_left = n;
    let mut next_internal = n;
    for step in 0..n - 1 {
        let min1 = pop_smallest(&count, &mut leaves_left, &mut next_internal);
        let min2 = pop_smallest(&count, &mut leaves_left, &mut next_internal);
        count[n + step] = count[min1].saturating_add(count[min2]);
        parent[min1] = n + step;
        parent[min2] = n + step;
        binary[min2] = 1;
    }

    let root = 2 * n - 2;
    let mut bits: Vec<u8> = Vec::with_capacity(max_code_len);
    let mut nodes: Vec<usize> = Vec::with_capacity(max_code_len);
    let entries = vocab.entries_mut();

    for (leaf, &i) in order.iter().enumerate() {

        let entry = &mut entries[i];
        bits.clear();
        nodes.clear();

        let mut node = leaf;
        loop {
            if bits.len() == max_code_len {
                return Err(Word2VecError::CodeTooLong {
                    word: entry.word_lossy().into_owned(),
                    max: max_code_len
                });
            }
            bits.push(binary[node]);
            nodes.push(node);
            node = parent[node];
            if node == root {
                break;
            }
        }

        let codelen = bits.len();
        entry.code.clear();
        entry.code.extend(bits.iter().rev());

        entry.path.clear();
        entry.path.push((n - 2) as u32);
        entry.path.extend((1..codelen).map(|depth| (nodes[codelen - depth] - n) as u32));
    }

    Ok(())
}


#[cfg(test)]
mod tests {

    use super::encode;
    use crate::builder::{OverflowPolicy, VocabBuilder};
    use crate::tokenizer::WordReader;
    use crate::vocab::{GrowthPolicy, Vocab, VocabOptions};

    fn sorted_vocab(sentinel_count: u64, counts: &[u64], max_code_len: usize) -> Vocab {

        let options = VocabOptions {
            hash_size: 4 * counts.len() + 8,
            initial_capacity: 8,
            growth: GrowthPolicy::Doubling,
            max_code_len
        };
        let mut vocab = Vocab::new(&options);
        for _ in 0..sentinel_count {
            vocab.increment(0);
        }
        for (k, count) in counts.iter().enumerate() {
            let i = vocab.insert(format!("w{}", k).as_bytes()).unwrap();
            for _ in 0..*count {
                vocab.increment(i);
            }
        }
        vocab.sort_and_finalize(0);
        vocab
    }

    #[test]
    fn golden_tree_test() {

        let mut vocab = sorted_vocab(10, &[5, 3, 2], 40);
        encode(&mut vocab).unwrap();

        let codes: Vec<Vec<u8>> = vocab.entries().iter().map(|e| e.code.clone()).collect();
        let paths: Vec<Vec<u32>> = vocab.entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(codes, vec![vec![1], vec![0, 1], vec![0, 0, 1], vec![0, 0, 0]]);
        assert_eq!(paths, vec![vec![2], vec![2, 1], vec![2, 1, 0], vec![2, 1, 0]]);
    }

    #[test]
    fn code_properties_test() {

        let counts: Vec<u64> = (1..=60).rev().map(|c| c * 3 + 1).collect();
        let mut vocab = sorted_vocab(500, &counts, 40);
        encode(&mut vocab).unwrap();

        let n = vocab.len();
        for entry in vocab.entries() {
            assert!(entry.codelen() >= 1 && entry.codelen() <= 40);
            assert_eq!(entry.path.len(), entry.codelen());
            assert_eq!(entry.path[0] as usize, n - 2);
            assert!(entry.path.iter().all(|&p| (p as usize) < n - 1));
            assert!(entry.code.iter().all(|&b| b <= 1));
        }

        // no two distinct counts in this vocabulary are equal
        for a in vocab.entries() {
            for b in vocab.entries() {
                if a.count > b.count {
                    assert!(a.codelen() <= b.codelen());
                }
            }
        }
    }

    #[test]
    fn rare_sentence_mark_test() {

        // no line feed, so </s> keeps a count of 0 at index 0
        let options = VocabOptions { hash_size: 64, ..VocabOptions::default() };
        let mut builder = VocabBuilder::new(options, 0, 1, OverflowPolicy::Stop);
        let mut reader = WordReader::new(&b"a a a b b c"[..], 100);
        let (mut vocab, _) = builder.learn_from_corpus(&mut reader).unwrap();
        encode(&mut vocab).unwrap();

        let lens: Vec<(u64, usize)> = vocab.entries().iter().map(|e| (e.count, e.codelen())).collect();
        assert_eq!(lens, vec![(0, 3), (3, 1), (2, 2), (1, 3)]);
        for a in vocab.entries() {
            assert_eq!(a.path[0], 2);
            for b in vocab.entries() {
                if a.count > b.count {
                    assert!(a.codelen() <= b.codelen(), "{}:{} vs {}:{}", a.word_lossy(), a.count, b.word_lossy(), b.count);
                }
            }
        }
    }

    #[test]
    fn codes_are_prefix_free_test() {

        let mut vocab = sorted_vocab(0, &[9, 9, 4, 4, 4, 1, 1], 40);
        encode(&mut vocab).unwrap();

        let codes: Vec<&Vec<u8>> = vocab.entries().iter().map(|e| &e.code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn two_entries_test() {
        let mut vocab = sorted_vocab(1, &[1], 40);
        encode(&mut vocab).unwrap();
        assert_eq!(vocab.entries()[0].path, vec![0]);
        assert_eq!(vocab.entries()[0].codelen() + vocab.entries()[1].codelen(), 2);
    }

    #[test]
    fn too_small_test() {
        let mut vocab = sorted_vocab(3, &[], 40);
        assert!(encode(&mut vocab).is_err());
    }

    #[test]
    fn code_too_long_test() {
        // powers of two give a maximally skewed tree
        let counts: Vec<u64> = (0..12).rev().map(|p| 1u64 << p).collect();
        let mut vocab = sorted_vocab(1 << 13, &counts, 4);
        assert!(encode(&mut vocab).is_err());
    }

}
