/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 优化状态：当前点、函数值、梯度、下降方向、调用计数与终止状态
 *
 * 每次求解调用都拥有自己的`State`，每个被接受的迭代更新一次；
 * 传给进度回调的是不可变引用（即当前迭代的快照）。
 */

mod epsilon;


pub use epsilon::Epsilon;

use serde::{Deserialize, Serialize};

use crate::impl_enum_names;
use crate::problem::{Problem, Vector};

/// 优化状态码
///
/// `Running`是唯一的非终止状态，其余状态都会结束求解循环。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Status {
    Running,
    Converged,
    MaxIterations,
    LineSearchFailed,
}

impl_enum_names!(Status, "状态", [
    (Running, "running"),
    (Converged, "converged"),
    (MaxIterations, "max-iterations"),
    (LineSearchFailed, "linesearch-failed"),
]);

impl Status {
    /// 是否为终止状态
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// 优化状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    /// 当前点
    pub x: Vector,
    /// 当前梯度
    pub g: Vector,
    /// 当前下降方向（批量求解器使用）
    pub d: Vector,
    /// 当前函数值
    pub f: f64,
    /// 最近一次被接受的线搜索步长
    pub t: f64,
    /// 已接受的迭代次数
    pub iterations: usize,
    /// 函数值调用次数
    pub fcalls: usize,
    /// 梯度调用次数
    pub gcalls: usize,
    pub status: Status,
}

impl State {
    /// 在初始点`x0`处创建状态（立即计算函数值和梯度）
    pub fn new(problem: &Problem, x0: Vector) -> Self {
        let (f, g) = problem.value_and_grad(&x0);
        let n = x0.len();
        Self {
            x: x0,
            g,
            d: Vector::zeros(n),
            f,
            t: 0.0,
            iterations: 0,
            fcalls: problem.fcalls(),
            gcalls: problem.gcalls(),
            status: Status::Running,
        }
    }

    /// 移动到新的点`x`（重新计算函数值和梯度）
    pub fn update(&mut self, problem: &Problem, x: Vector) {
        let (f, g) = problem.value_and_grad(&x);
        self.x = x;
        self.f = f;
        self.g = g;
        self.iterations += 1;
        self.sync_calls(problem);
    }

    /// 沿当前下降方向移动步长`t`，函数值`f`与梯度`g`已由线搜索算好
    pub fn update_step(&mut self, problem: &Problem, t: f64, f: f64, g: Vector) {
        self.x.scaled_add(t, &self.d);
        self.f = f;
        self.g = g;
        self.t = t;
        self.iterations += 1;
        self.sync_calls(problem);
    }

    /// 若`other`更优（函数值更小）则采用其点、函数值和梯度；计数与状态码总是同步
    ///
    /// 返回是否发生了改进
    pub fn improve(&mut self, other: &State) -> bool {
        let better = other.is_better_than(self);
        if better {
            self.x.assign(&other.x);
            self.g.assign(&other.g);
            self.d.assign(&other.d);
            self.f = other.f;
            self.t = other.t;
        }
        self.iterations = other.iterations;
        self.fcalls = other.fcalls;
        self.gcalls = other.gcalls;
        self.status = other.status;
        better
    }

    /// 按函数值比较（非有限值视为最差）
    pub fn is_better_than(&self, other: &State) -> bool {
        let f1 = if self.f.is_finite() { self.f } else { f64::MAX };
        let f2 = if other.f.is_finite() { other.f } else { f64::MAX };
        f1 < f2
    }

    /// 从问题同步调用计数
    pub fn sync_calls(&mut self, problem: &Problem) {
        self.fcalls = problem.fcalls();
        self.gcalls = problem.gcalls();
    }

    /// 收敛判据：相对梯度 ‖g‖ / max(1, ‖x‖)
    pub fn convergence_criteria(&self) -> f64 {
        let gnorm = self.g.dot(&self.g).sqrt();
        let xnorm = self.x.dot(&self.x).sqrt();
        gnorm / xnorm.max(1.0)
    }

    /// 梯度是否已足够小
    pub fn converged(&self, epsilon: f64) -> bool {
        self.convergence_criteria() < epsilon
    }

    /// 点、函数值与梯度是否都是有限值
    pub fn is_finite(&self) -> bool {
        self.f.is_finite()
            && self.x.iter().all(|v| v.is_finite())
            && self.g.iter().all(|v| v.is_finite())
    }
}
