/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : Nesterov 加速梯度（AG）及带梯度重启的版本（AGGR）
 */

use super::{LearningRate, StochStep};
use crate::problem::Vector;

/// Nesterov 加速梯度
///
/// 梯度在外推点 y 处求取：
/// ```text
/// x_k     = y_k - α_t·ĝ(y_k)
/// y_{k+1} = x_k + (k-1)/(k+2)·(x_k - x_{k-1})
/// ```
/// 开启重启时，若 ĝ(y_k)ᵗ(x_k - x_{k-1}) > 0（动量与下降方向相悖）则把动量计数归一。
#[derive(Debug, Clone)]
pub struct Ag {
    /// 当前迭代点 x_k
    x: Vector,
    /// 外推点 y_k
    y: Vector,
    lrate: LearningRate,
    /// 动量计数（从 1 开始）
    k: usize,
    t: usize,
    restart: bool,
    restarts: usize,
}

impl Ag {
    pub fn new(x0: Vector, lrate: LearningRate) -> Self {
        Self {
            y: x0.clone(),
            x: x0,
            lrate,
            k: 1,
            t: 0,
            restart: false,
            restarts: 0,
        }
    }

    /// 带梯度重启的版本（AGGR）
    pub fn with_gradient_restart(x0: Vector, lrate: LearningRate) -> Self {
        Self {
            restart: true,
            ..Self::new(x0, lrate)
        }
    }

    /// 动量被重启的次数
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl StochStep for Ag {
    fn query(&self) -> &Vector {
        &self.y
    }

    fn step(&mut self, g: &Vector) {
        let alpha = self.lrate.at(self.t);
        self.t += 1;

        let mut cx = self.y.clone();
        cx.scaled_add(-alpha, g);
        let delta = &cx - &self.x;

        if self.restart && g.dot(&delta) > 0.0 {
            self.k = 1;
            self.restarts += 1;
        }

        let momentum = (self.k as f64 - 1.0) / (self.k as f64 + 2.0);
        self.y = &cx + &(momentum * &delta);
        self.x = cx;
        self.k += 1;
    }

    fn solution(&self) -> &Vector {
        &self.x
    }
}
