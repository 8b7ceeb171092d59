mod minimize;

use std::cell::RefCell;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::problem::{Function, Vector};

/// 梯度带有有界独立同分布噪声的球函数（函数值本身是精确的）
pub(super) struct NoisySphere {
    dims: usize,
    noise: f64,
    rng: RefCell<StdRng>,
}

impl NoisySphere {
    pub(super) fn new(dims: usize, noise: f64, seed: u64) -> Self {
        Self {
            dims,
            noise,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Function for NoisySphere {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        x.dot(x)
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let mut rng = self.rng.borrow_mut();
        let g = x.mapv(|v| 2.0 * v + rng.gen_range(-self.noise..=self.noise));
        (x.dot(x), g)
    }
}

pub(super) fn random_x0(seed: u64, dims: usize) -> Vector {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from_shape_fn(dims, |_| rng.gen_range(-1.0..1.0))
}
