/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 逐坐标自适应步长：ADAGRAD 与 ADADELTA
 */

use ndarray::Zip;

use super::StochStep;
use crate::problem::Vector;

/// 分母中防止除零的小量
const EPSILON: f64 = 1e-6;

/// ADAGRAD：x_i ← x_i - α0·ĝ_i / (√(Σ ĝ_i²) + ε)
///
/// 累加和本身使步长随时间衰减，因此不需要衰减系数。
#[derive(Debug, Clone)]
pub struct Adagrad {
    x: Vector,
    alpha0: f64,
    /// 梯度平方的累加和
    sum: Vector,
}

impl Adagrad {
    pub fn new(x0: Vector, alpha0: f64) -> Self {
        let n = x0.len();
        Self {
            x: x0,
            alpha0,
            sum: Vector::zeros(n),
        }
    }
}

impl StochStep for Adagrad {
    fn query(&self) -> &Vector {
        &self.x
    }

    fn step(&mut self, g: &Vector) {
        let alpha0 = self.alpha0;
        Zip::from(&mut self.x)
            .and(&mut self.sum)
            .and(g)
            .for_each(|x, sum, &gi| {
                *sum += gi * gi;
                *x -= alpha0 * gi / (sum.sqrt() + EPSILON);
            });
    }

    fn solution(&self) -> &Vector {
        &self.x
    }
}

/// ADADELTA：梯度平方与更新量平方都做指数滑动平均，步长为二者均方根之比（无需学习率）
#[derive(Debug, Clone)]
pub struct Adadelta {
    x: Vector,
    /// E[ĝ²]
    avg_g2: Vector,
    /// E[Δx²]
    avg_dx2: Vector,
}

impl Adadelta {
    /// 滑动平均的动量系数
    pub const RHO: f64 = 0.95;

    pub fn new(x0: Vector) -> Self {
        let n = x0.len();
        Self {
            x: x0,
            avg_g2: Vector::zeros(n),
            avg_dx2: Vector::zeros(n),
        }
    }
}

impl StochStep for Adadelta {
    fn query(&self) -> &Vector {
        &self.x
    }

    fn step(&mut self, g: &Vector) {
        let rho = Self::RHO;
        Zip::from(&mut self.x)
            .and(&mut self.avg_g2)
            .and(&mut self.avg_dx2)
            .and(g)
            .for_each(|x, avg_g2, avg_dx2, &gi| {
                *avg_g2 = rho * *avg_g2 + (1.0 - rho) * gi * gi;
                let dx = -((*avg_dx2 + EPSILON).sqrt() / (*avg_g2 + EPSILON).sqrt()) * gi;
                *avg_dx2 = rho * *avg_dx2 + (1.0 - rho) * dx * dx;
                *x += dx;
            });
    }

    fn solution(&self) -> &Vector {
        &self.x
    }
}
