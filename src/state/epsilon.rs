use serde::{Deserialize, Serialize};

use crate::impl_enum_names;

/// 收敛精度等级（以机器精度为基准），供调用方选择“严格”或“宽松”的收敛判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Epsilon {
    /// ε
    Tight,
    /// √ε
    Strict,
    /// 10·√ε
    Normal,
    /// 100·√ε
    Loose,
}

impl_enum_names!(Epsilon, "精度等级", [
    (Tight, "tight"),
    (Strict, "strict"),
    (Normal, "normal"),
    (Loose, "loose"),
]);

impl Epsilon {
    pub fn value(&self) -> f64 {
        let sqrt_eps = f64::EPSILON.sqrt();
        match self {
            Self::Tight => f64::EPSILON,
            Self::Strict => sqrt_eps,
            Self::Normal => 10.0 * sqrt_eps,
            Self::Loose => 100.0 * sqrt_eps,
        }
    }

    /// 按问题维度放大的精度：value · √n
    pub fn for_size(&self, n: usize) -> f64 {
        self.value() * (n.max(1) as f64).sqrt()
    }
}
