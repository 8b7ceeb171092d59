/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 用于验证求解器的经典测试函数
 *
 * 每个函数都提供解析梯度、定义域检查与极小点检查，
 * 参见 https://www.sfu.ca/~ssurjano/optimization.html
 */

mod bohachevsky;
mod convex;
mod landscape;


pub use bohachevsky::{Bohachevsky, BohachevskyKind};
pub use convex::{DixonPrice, RotatedEllipsoid, Sphere, SumSquares, Trid, Zakharov};
pub use landscape::{Beale, Booth, Himmelblau, Matyas, Rosenbrock, ThreeHumpCamel};

use crate::problem::{Function, Vector};

/// 测试函数
pub trait TestFunction: Function + Send + Sync {
    /// 名称（n 维函数带上维度）
    fn name(&self) -> String;

    /// `x`是否在函数的定义域（搜索区域）内
    fn is_valid(&self, x: &Vector) -> bool;

    /// `x`是否（在`epsilon`精度内）是函数的极小点
    fn is_minima(&self, x: &Vector, epsilon: f64) -> bool;
}

/// 欧氏距离
pub(crate) fn distance(a: &Vector, b: &Vector) -> f64 {
    let diff = a - b;
    diff.dot(&diff).sqrt()
}

/// 是否所有分量都落在 (-bound, bound) 内
pub(crate) fn in_box(x: &Vector, bound: f64) -> bool {
    x.iter().all(|v| v.abs() < bound)
}

/// 创建维度在 [min_dims, max_dims] 内的全部测试函数
///
/// n 维函数按维度倍增（min_dims, 2·min_dims, ...）各创建一个，二维函数在 2 落入区间时创建一次。
pub fn make_all(min_dims: usize, max_dims: usize) -> Vec<Box<dyn TestFunction>> {
    let min_dims = min_dims.max(1);
    let mut functions: Vec<Box<dyn TestFunction>> = Vec::new();

    let mut dims = min_dims;
    while dims <= max_dims {
        functions.push(Box::new(Sphere::new(dims)));
        functions.push(Box::new(SumSquares::new(dims)));
        functions.push(Box::new(RotatedEllipsoid::new(dims)));
        functions.push(Box::new(Trid::new(dims)));
        functions.push(Box::new(Zakharov::new(dims)));
        functions.push(Box::new(DixonPrice::new(dims)));
        if dims >= 2 {
            functions.push(Box::new(Rosenbrock::new(dims)));
        }
        dims *= 2;
    }

    if (min_dims..=max_dims).contains(&2) {
        functions.push(Box::new(Beale));
        functions.push(Box::new(Booth));
        functions.push(Box::new(Matyas));
        functions.push(Box::new(Himmelblau));
        functions.push(Box::new(ThreeHumpCamel));
        for kind in BohachevskyKind::ALL {
            functions.push(Box::new(Bohachevsky::new(*kind)));
        }
    }

    functions
}
