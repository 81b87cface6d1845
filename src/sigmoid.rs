
// imports
use log::info;
use ndarray::Array1;


pub const DEFAULT_EXP_TABLE_SIZE: usize = 1000;
pub const DEFAULT_MAX_EXP: f64 = 6.0;


/// Precomputed logistic function over `[0, max_exp]`, `exp_table_size + 1`
/// evenly spaced points. Negative arguments are served by symmetry.
#[derive(Clone, Debug, PartialEq)]
pub struct SigmoidTable {
    table: Array1<f64>,
    max_exp: f64,
}

impl SigmoidTable {

    pub fn new(exp_table_size: usize, max_exp: f64) -> SigmoidTable {

        info!("precomputing sigmoid table of {} entries, max_exp {}", exp_table_size + 1, max_exp);

        let size = exp_table_size.max(1) as f64;
        let table = Array1::from_shape_fn(exp_table_size + 1, |i| {
            let e = (i as f64 / size * max_exp).exp();
            e / (e + 1.0)
        });

        Self { table, max_exp }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn max_exp(&self) -> f64 {
        self.max_exp
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.table
    }

    /// Approximates `1 / (1 + e^-x)`; `None` outside `(-max_exp, max_exp)`,
    /// where callers clip to 0 or 1.
    pub fn lookup(&self, x: f64) -> Option<f64> {

        if x.is_nan() || x.abs() >= self.max_exp {
            return None;
        }

        let steps = (self.table.len() - 1) as f64;
        let i = (x.abs() / self.max_exp * steps) as usize;
        let value = self.table[i];
        if x < 0.0 {
            Some(1.0 - value)
        } else {
            Some(value)
        }
    }

}


#[cfg(test)]
mod tests {

    use super::{SigmoidTable, DEFAULT_EXP_TABLE_SIZE, DEFAULT_MAX_EXP};

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    #[test]
    fn default_table_test() {

        let table = SigmoidTable::new(DEFAULT_EXP_TABLE_SIZE, DEFAULT_MAX_EXP);
        let values = table.as_array();

        assert_eq!(table.len(), 1001);
        assert_eq!(values[0], 0.5);
        assert!((values[501] - 0.9528444519169822).abs() < 1e-12);
        assert!((values[1000] - sigmoid(6.0)).abs() < 1e-12);
        assert!(values.iter().zip(values.iter().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn lookup_test() {

        let table = SigmoidTable::new(DEFAULT_EXP_TABLE_SIZE, DEFAULT_MAX_EXP);

        for x in [-5.9, -3.0, -0.4, 0.0, 0.25, 1.0, 4.5, 5.99] {
            let approx = table.lookup(x).unwrap();
            assert!((approx - sigmoid(x)).abs() < 5e-3, "x = {}", x);
        }
        assert_eq!(table.lookup(6.0), None);
        assert_eq!(table.lookup(-7.5), None);
        assert_eq!(table.lookup(f64::NAN), None);
    }

}
