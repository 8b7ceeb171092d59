/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 随机梯度下降及其两种迭代平均版本
 */

use super::{LearningRate, StochStep};
use crate::problem::Vector;

/// SG：x ← x - α_t·ĝ
#[derive(Debug, Clone)]
pub struct Sg {
    x: Vector,
    lrate: LearningRate,
    /// 已完成的步数
    t: usize,
}

impl Sg {
    pub fn new(x0: Vector, lrate: LearningRate) -> Self {
        Self { x: x0, lrate, t: 0 }
    }

    pub fn steps(&self) -> usize {
        self.t
    }
}

impl StochStep for Sg {
    fn query(&self) -> &Vector {
        &self.x
    }

    fn step(&mut self, g: &Vector) {
        let alpha = self.lrate.at(self.t);
        self.x.scaled_add(-alpha, g);
        self.t += 1;
    }

    fn solution(&self) -> &Vector {
        &self.x
    }
}

/// SGA：SG 的迭代点做 Polyak 平均，报告平均值
#[derive(Debug, Clone)]
pub struct Sga {
    sg: Sg,
    average: Vector,
}

impl Sga {
    pub fn new(x0: Vector, lrate: LearningRate) -> Self {
        Self {
            average: x0.clone(),
            sg: Sg::new(x0, lrate),
        }
    }
}

impl StochStep for Sga {
    fn query(&self) -> &Vector {
        self.sg.query()
    }

    fn step(&mut self, g: &Vector) {
        self.sg.step(g);
        // 第 k 步的权重 1/k
        let weight = 1.0 / self.sg.steps() as f64;
        accumulate(&mut self.average, self.sg.solution(), weight);
    }

    fn solution(&self) -> &Vector {
        &self.average
    }
}

/// SIA：权重随步数线性增加的迭代平均（近期迭代点占比更大）
#[derive(Debug, Clone)]
pub struct Sia {
    sg: Sg,
    average: Vector,
}

impl Sia {
    pub fn new(x0: Vector, lrate: LearningRate) -> Self {
        Self {
            average: x0.clone(),
            sg: Sg::new(x0, lrate),
        }
    }
}

impl StochStep for Sia {
    fn query(&self) -> &Vector {
        self.sg.query()
    }

    fn step(&mut self, g: &Vector) {
        self.sg.step(g);
        // 第 k 个迭代点的权重为 k：增量形式为 2/(k+1)
        let k = self.sg.steps() as f64;
        accumulate(&mut self.average, self.sg.solution(), 2.0 / (k + 1.0));
    }

    fn solution(&self) -> &Vector {
        &self.average
    }
}

/// average ← average + weight·(x - average)
fn accumulate(average: &mut Vector, x: &Vector, weight: f64) {
    average.zip_mut_with(x, |a, &xi| *a += weight * (xi - *a));
}
