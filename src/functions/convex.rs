//! n 维的凸（或单峰）测试函数

use super::{TestFunction, distance, in_box};
use crate::problem::{Function, Vector};

/// 球函数：f(x) = Σ x_i²
#[derive(Debug, Clone)]
pub struct Sphere {
    dims: usize,
}

impl Sphere {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }
}

impl Function for Sphere {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        x.dot(x)
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        (x.dot(x), 2.0 * x)
    }
}

impl TestFunction for Sphere {
    fn name(&self) -> String {
        format!("Sphere[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 5.12)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &Vector::zeros(self.dims)) < epsilon
    }
}

/// 轴对齐的超椭球：f(x) = Σ (i+1)·x_i²
#[derive(Debug, Clone)]
pub struct SumSquares {
    dims: usize,
}

impl SumSquares {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }
}

impl Function for SumSquares {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        x.iter()
            .enumerate()
            .map(|(i, v)| (i + 1) as f64 * v * v)
            .sum()
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let g = Vector::from_shape_fn(x.len(), |i| 2.0 * (i + 1) as f64 * x[i]);
        (self.value(x), g)
    }
}

impl TestFunction for SumSquares {
    fn name(&self) -> String {
        format!("SumSquares[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 10.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &Vector::zeros(self.dims)) < epsilon
    }
}

/// 旋转超椭球：f(x) = Σ_i (Σ_{j≤i} x_j)²
#[derive(Debug, Clone)]
pub struct RotatedEllipsoid {
    dims: usize,
}

impl RotatedEllipsoid {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    fn prefix_sums(x: &Vector) -> Vector {
        let mut sums = x.clone();
        sums.accumulate_axis_inplace(ndarray::Axis(0), |&prev, curr| *curr += prev);
        sums
    }
}

impl Function for RotatedEllipsoid {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        let sums = Self::prefix_sums(x);
        sums.dot(&sums)
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let sums = Self::prefix_sums(x);

        // ∂f/∂x_k = 2·Σ_{i≥k} S_i，即 2·S 的后缀和
        let mut g = 2.0 * &sums;
        for k in (0..g.len().saturating_sub(1)).rev() {
            g[k] += g[k + 1];
        }
        (sums.dot(&sums), g)
    }
}

impl TestFunction for RotatedEllipsoid {
    fn name(&self) -> String {
        format!("RotatedEllipsoid[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 65.536)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &Vector::zeros(self.dims)) < epsilon
    }
}

/// Trid 函数：f(x) = Σ (x_i - 1)² - Σ_{i≥1} x_i·x_{i-1}
#[derive(Debug, Clone)]
pub struct Trid {
    dims: usize,
}

impl Trid {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    /// 唯一极小点：x_i = i·(n + 1 - i)（i 从 1 开始）
    pub fn minimum(&self) -> Vector {
        let n = self.dims as f64;
        Vector::from_shape_fn(self.dims, |i| {
            let i = (i + 1) as f64;
            i * (n + 1.0 - i)
        })
    }
}

impl Function for Trid {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        let squares: f64 = x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum();
        let products: f64 = (1..x.len()).map(|i| x[i] * x[i - 1]).sum();
        squares - products
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let n = x.len();
        let g = Vector::from_shape_fn(n, |i| {
            let mut gi = 2.0 * (x[i] - 1.0);
            if i > 0 {
                gi -= x[i - 1];
            }
            if i + 1 < n {
                gi -= x[i + 1];
            }
            gi
        });
        (self.value(x), g)
    }
}

impl TestFunction for Trid {
    fn name(&self) -> String {
        format!("Trid[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        let bound = (self.dims * self.dims) as f64;
        in_box(x, bound.max(1.0) + 1.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &self.minimum()) < epsilon
    }
}

/// Zakharov 函数：u = Σ x_i²，v = Σ 0.5·(i+1)·x_i，f = u + v² + v⁴
#[derive(Debug, Clone)]
pub struct Zakharov {
    dims: usize,
}

impl Zakharov {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    fn weights(n: usize) -> Vector {
        Vector::from_shape_fn(n, |i| 0.5 * (i + 1) as f64)
    }
}

impl Function for Zakharov {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        let u = x.dot(x);
        let v = Self::weights(x.len()).dot(x);
        u + v * v + v.powi(4)
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let w = Self::weights(x.len());
        let u = x.dot(x);
        let v = w.dot(x);

        let mut g = 2.0 * x;
        g.scaled_add(2.0 * v + 4.0 * v.powi(3), &w);
        (u + v * v + v.powi(4), g)
    }
}

impl TestFunction for Zakharov {
    fn name(&self) -> String {
        format!("Zakharov[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        x.iter().all(|v| -5.0 < *v && *v < 10.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &Vector::zeros(self.dims)) < epsilon
    }
}

/// Dixon–Price 函数：f(x) = (x_1 - 1)² + Σ_{i≥2} i·(2x_i² - x_{i-1})²
///
/// 极小值为 0，但极小点不唯一（x_i 的符号可以翻转），因此按函数值判断极小点。
#[derive(Debug, Clone)]
pub struct DixonPrice {
    dims: usize,
}

impl DixonPrice {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }
}

impl Function for DixonPrice {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        let head = (x[0] - 1.0) * (x[0] - 1.0);
        let tail: f64 = (1..x.len())
            .map(|i| {
                let r = 2.0 * x[i] * x[i] - x[i - 1];
                (i + 1) as f64 * r * r
            })
            .sum();
        head + tail
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let mut g = Vector::zeros(x.len());
        g[0] = 2.0 * (x[0] - 1.0);
        for i in 1..x.len() {
            let w = (i + 1) as f64;
            let r = 2.0 * x[i] * x[i] - x[i - 1];
            g[i] += w * 2.0 * r * 4.0 * x[i];
            g[i - 1] -= w * 2.0 * r;
        }
        (self.value(x), g)
    }
}

impl TestFunction for DixonPrice {
    fn name(&self) -> String {
        format!("DixonPrice[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 10.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        self.value(x) < epsilon
    }
}
