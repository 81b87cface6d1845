
// imports
use crate::error::{Result, Word2VecError};
use crate::vocab::Vocab;

use log::info;
use ndarray::Array1;
use rand::Rng;


/// Smoothing exponent applied to word counts.
pub const UNIGRAM_POWER: f64 = 0.75;

pub const DEFAULT_TABLE_SIZE: usize = 100_000_000;


/// Vocabulary indices laid out so that a uniformly drawn position selects word
/// `i` with probability `count[i]^0.75 / Σ count^0.75`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnigramTable {
    table: Array1<u32>,
}

impl UnigramTable {

    pub fn new(vocab: &Vocab, table_size: usize) -> Result<UnigramTable> {
        let counts: Vec<u64> = vocab.entries().iter().map(|e| e.count).collect();
        UnigramTable::from_counts(&counts, table_size)
    }

    pub fn from_counts(counts: &[u64], table_size: usize) -> Result<UnigramTable> {

        let power = |count: u64| (count as f64).powf(UNIGRAM_POWER);
        let total: f64 = counts.iter().map(|&c| power(c)).sum();
        if table_size == 0 || total <= 0.0 {
            return Err(Word2VecError::EmptyDistribution);
        }

        info!("building unigram table of {} entries over {} words", table_size, counts.len());

        let last = counts.len() - 1;
        let mut table: Array1<u32> = Array1::zeros(table_size);
        let mut i = 0usize;
        let mut d1 = power(counts[0]) / total;

        for (pos, slot) in table.iter_mut().enumerate() {
            *slot = i as u32;
            if pos as f64 / table_size as f64 > d1 && i < last {
                i += 1;
                d1 += power(counts[i]) / total;
            }
        }

        Ok(Self { table })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn as_array(&self) -> &Array1<u32> {
        &self.table
    }

    /// Fraction of table positions holding vocabulary index `i`.
    pub fn frequency(&self, i: u32) -> f64 {
        self.table.iter().filter(|&&v| v == i).count() as f64 / self.table.len() as f64
    }

    /// Draws a vocabulary index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.table[rng.gen_range(0..self.table.len())]
    }

}

impl From<Array1<u32>> for UnigramTable {
    fn from(table: Array1<u32>) -> Self {
        Self { table }
    }
}


#[cfg(test)]
mod tests {

    use super::{UnigramTable, UNIGRAM_POWER};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn expected(counts: &[u64], i: usize) -> f64 {
        let total: f64 = counts.iter().map(|&c| (c as f64).powf(UNIGRAM_POWER)).sum();
        (counts[i] as f64).powf(UNIGRAM_POWER) / total
    }

    #[test]
    fn table_shape_test() {

        let counts = [0, 40, 20, 10, 5, 1];
        let table = UnigramTable::from_counts(&counts, 100_000).unwrap();

        assert_eq!(table.len(), 100_000);
        let values = table.as_array().to_vec();
        assert!(values.iter().all(|&v| (v as usize) < counts.len()));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values[values.len() - 1] as usize, counts.len() - 1);
    }

    #[test]
    fn frequencies_converge_test() {

        let counts = [7, 1000, 300, 300, 45, 2];
        let table = UnigramTable::from_counts(&counts, 1_000_000).unwrap();

        for i in 0..counts.len() {
            let diff = (table.frequency(i as u32) - expected(&counts, i)).abs();
            assert!(diff < 1e-3, "index {}: got {}, want {}", i, table.frequency(i as u32), expected(&counts, i));
        }
    }

    #[test]
    fn sample_test() {

        let counts = [1, 100, 1];
        let table = UnigramTable::from_counts(&counts, 10_000).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let draws = 20_000;
        let hits = (0..draws).filter(|_| table.sample(&mut rng) == 1).count();
        let share = hits as f64 / draws as f64;
        assert!((share - expected(&counts, 1)).abs() < 0.02);
    }

    #[test]
    fn empty_distribution_test() {
        assert!(UnigramTable::from_counts(&[0, 0], 100).is_err());
        assert!(UnigramTable::from_counts(&[], 100).is_err());
        assert!(UnigramTable::from_counts(&[3], 0).is_err());
    }

}
