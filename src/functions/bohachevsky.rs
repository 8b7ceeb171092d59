use std::f64::consts::PI;

use super::{TestFunction, in_box};
use crate::impl_enum_names;
use crate::problem::{Function, Vector};

/// Bohachevsky 函数的三种形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BohachevskyKind {
    One,
    Two,
    Three,
}

impl_enum_names!(BohachevskyKind, "Bohachevsky函数类型", [
    (One, "bohachevsky1"),
    (Two, "bohachevsky2"),
    (Three, "bohachevsky3"),
]);

/// Bohachevsky 函数：u = x1² + 2·x2² 加上余弦扰动
#[derive(Debug, Clone)]
pub struct Bohachevsky {
    kind: BohachevskyKind,
}

impl Bohachevsky {
    pub fn new(kind: BohachevskyKind) -> Self {
        Self { kind }
    }
}

impl Function for Bohachevsky {
    fn size(&self) -> usize {
        2
    }

    fn value(&self, x: &Vector) -> f64 {
        let (x1, x2) = (x[0], x[1]);
        let (p1, p2) = (3.0 * PI * x1, 4.0 * PI * x2);
        let u = x1 * x1 + 2.0 * x2 * x2;

        match self.kind {
            BohachevskyKind::One => u - 0.3 * p1.cos() - 0.4 * p2.cos() + 0.7,
            BohachevskyKind::Two => u - 0.3 * p1.cos() * p2.cos() + 0.3,
            BohachevskyKind::Three => u - 0.3 * (p1 + p2).cos() + 0.3,
        }
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        let (x1, x2) = (x[0], x[1]);
        let (p1, p2) = (3.0 * PI * x1, 4.0 * PI * x2);

        let (g1, g2) = match self.kind {
            BohachevskyKind::One => (
                2.0 * x1 + 0.9 * PI * p1.sin(),
                4.0 * x2 + 1.6 * PI * p2.sin(),
            ),
            BohachevskyKind::Two => (
                2.0 * x1 + 0.9 * PI * p1.sin() * p2.cos(),
                4.0 * x2 + 1.2 * PI * p1.cos() * p2.sin(),
            ),
            BohachevskyKind::Three => (
                2.0 * x1 + 0.9 * PI * (p1 + p2).sin(),
                4.0 * x2 + 1.2 * PI * (p1 + p2).sin(),
            ),
        };
        (self.value(x), Vector::from(vec![g1, g2]))
    }
}

impl TestFunction for Bohachevsky {
    fn name(&self) -> String {
        match self.kind {
            BohachevskyKind::One => "Bohachevsky1",
            BohachevskyKind::Two => "Bohachevsky2",
            BohachevskyKind::Three => "Bohachevsky3",
        }
        .to_string()
    }

    fn is_valid(&self, x: &Vector) -> bool {
        in_box(x, 100.0)
    }

    /// 局部极小点众多且没有解析形式，只要求梯度足够小
    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool {
        let (_, g) = self.value_and_grad(x);
        g.dot(&g).sqrt() < epsilon
    }
}
