//! 非凸或多峰的测试函数（Rosenbrock 为 n 维，其余为二维）

use super::{TestFunction, distance, in_box};
use crate::problem::{Function, Vector};

fn point(x1: f64, x2: f64) -> Vector {
    Vector::from(vec![x1, x2])
}

/// Rosenbrock 函数：f(x) = Σ 100·(x_{i+1} - x_i²)² + (1 - x_i)²
#[derive(Debug, Clone)]
pub struct Rosenbrock {
    dims: usize,
}

impl Rosenbrock {
    /// 至少二维
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(2) }
    }
}

impl Function for Rosenbrock {
    fn size(&self) -> usize {
        self.dims
    }

    fn value(&self, x: &Vector) -> f64 {
        (0..x.len() - 1)
            .map(|i| {
                let a = x[i + 1] - x[i] * x[i];
                let b = 1.0 - x[i];
                100.0 * a * a + b * b
            })
            .sum()
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let mut g = Vector::zeros(x.len());
        for i in 0..x.len() - 1 {
            let a = x[i + 1] - x[i] * x[i];
            g[i] += -400.0 * x[i] * a - 2.0 * (1.0 - x[i]);
            g[i + 1] += 200.0 * a;
        }
        (self.value(x), g)
    }
}

impl TestFunction for Rosenbrock {
    fn name(&self) -> String {
        format!("Rosenbrock[{}D]", self.dims)
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 2.048)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &Vector::ones(self.dims)) < epsilon
    }
}

/// Beale 函数，极小点 (3, 0.5)
#[derive(Debug, Clone)]
pub struct Beale;

impl Beale {
    const C: [f64; 3] = [1.5, 2.25, 2.625];
}

impl Function for Beale {
    fn size(&self) -> usize {
        2
    }

    fn value(&self, x: &Vector) -> f64 {
        let (x1, x2) = (x[0], x[1]);
        Self::C
            .iter()
            .zip(1..)
            .map(|(c, k)| {
                let t = c - x1 + x1 * x2.powi(k);
                t * t
            })
            .sum()
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let (x1, x2) = (x[0], x[1]);
        let mut g = Vector::zeros(2);
        for (c, k) in Self::C.iter().zip(1..) {
            let t = c - x1 + x1 * x2.powi(k);
            g[0] += 2.0 * t * (x2.powi(k) - 1.0);
            g[1] += 2.0 * t * x1 * k as f64 * x2.powi(k - 1);
        }
        (self.value(x), g)
    }
}

impl TestFunction for Beale {
    fn name(&self) -> String {
        "Beale".to_string()
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 4.5)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &point(3.0, 0.5)) < epsilon
    }
}

/// Booth 函数，极小点 (1, 3)
#[derive(Debug, Clone)]
pub struct Booth;

impl Function for Booth {
    fn size(&self) -> usize {
        2
    }

    fn value(&self, x: &Vector) -> f64 {
        let a = x[0] + 2.0 * x[1] - 7.0;
        let b = 2.0 * x[0] + x[1] - 5.0;
        a * a + b * b
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let a = x[0] + 2.0 * x[1] - 7.0;
        let b = 2.0 * x[0] + x[1] - 5.0;
        (a * a + b * b, point(2.0 * a + 4.0 * b, 4.0 * a + 2.0 * b))
    }
}

impl TestFunction for Booth {
    fn name(&self) -> String {
        "Booth".to_string()
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 10.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &point(1.0, 3.0)) < epsilon
    }
}

/// Matyas 函数，极小点 (0, 0)
#[derive(Debug, Clone)]
pub struct Matyas;

impl Function for Matyas {
    fn size(&self) -> usize {
        2
    }

    fn value(&self, x: &Vector) -> f64 {
        0.26 * (x[0] * x[0] + x[1] * x[1]) - 0.48 * x[0] * x[1]
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let g = point(0.52 * x[0] - 0.48 * x[1], 0.52 * x[1] - 0.48 * x[0]);
        (self.value(x), g)
    }
}

impl TestFunction for Matyas {
    fn name(&self) -> String {
        "Matyas".to_string()
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 10.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        distance(x, &Vector::zeros(2)) < epsilon
    }
}

/// Himmelblau 函数：四个全局极小点，极小值均为 0
#[derive(Debug, Clone)]
pub struct Himmelblau;

impl Function for Himmelblau {
    fn size(&self) -> usize {
        2
    }

    fn value(&self, x: &Vector) -> f64 {
        let a = x[0] * x[0] + x[1] - 11.0;
        let b = x[0] + x[1] * x[1] - 7.0;
        a * a + b * b
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let a = x[0] * x[0] + x[1] - 11.0;
        let b = x[0] + x[1] * x[1] - 7.0;
        let g = point(4.0 * a * x[0] + 2.0 * b, 2.0 * a + 4.0 * b * x[1]);
        (a * a + b * b, g)
    }
}

impl TestFunction for Himmelblau {
    fn name(&self) -> String {
        "Himmelblau".to_string()
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 5.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        self.value(x) < epsilon
    }
}

/// 三峰骆驼函数：全局极小点 (0, 0)，另有两个对称的局部极小点
#[derive(Debug, Clone)]
pub struct ThreeHumpCamel;

impl ThreeHumpCamel {
    /// 全部（局部）极小点
    pub fn minima() -> [Vector; 3] {
        // 沿 x2 = -x1/2 有 x1⁴ - 4.2·x1² + 3.5 = 0，较大的根为极小点
        let x1 = ((4.2 + 3.64_f64.sqrt()) / 2.0).sqrt();
        [point(0.0, 0.0), point(x1, -0.5 * x1), point(-x1, 0.5 * x1)]
    }
}

impl Function for ThreeHumpCamel {
    fn size(&self) -> usize {
        2
    }

    fn value(&self, x: &Vector) -> f64 {
        let (x1, x2) = (x[0], x[1]);
        2.0 * x1 * x1 - 1.05 * x1.powi(4) + x1.powi(6) / 6.0 + x1 * x2 + x2 * x2
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let (x1, x2) = (x[0], x[1]);
        let g = point(4.0 * x1 - 4.2 * x1.powi(3) + x1.powi(5) + x2, x1 + 2.0 * x2);
        (self.value(x), g)
    }
}

impl TestFunction for ThreeHumpCamel {
    fn name(&self) -> String {
        "ThreeHumpCamel".to_string()
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 5.0)
    }

    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        Self::minima().iter().any(|m| distance(x, m) < epsilon)
    }
}
