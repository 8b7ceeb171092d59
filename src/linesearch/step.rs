/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 线搜索的一维试探步 φ(α) = f(x + α·d)
 *
 * 记号沿用 CG_DESCENT 论文：phi 为函数值，gphi 为沿方向 d 的方向导数。
 */

use crate::problem::{Problem, Vector};
use crate::state::State;

#[derive(Clone)]
pub struct LsStep<'a> {
    problem: &'a Problem<'a>,
    x0: &'a Vector,
    d: &'a Vector,
    phi0: f64,
    gphi0: f64,

    /// 当前步长
    alpha: f64,
    /// alpha 处的函数值
    phi: f64,
    /// alpha 处的梯度
    grad: Vector,
    /// alpha 处的方向导数
    gphi: f64,
}

impl<'a> LsStep<'a> {
    /// 以优化状态（x, f, g, d）作为线搜索起点，即 α = 0
    pub fn new(problem: &'a Problem<'a>, state: &'a State) -> Self {
        let gphi0 = state.d.dot(&state.g);
        Self {
            problem,
            x0: &state.x,
            d: &state.d,
            phi0: state.f,
            gphi0,
            alpha: 0.0,
            phi: state.f,
            grad: state.g.clone(),
            gphi: gphi0,
        }
    }

    /// 允许的最小步长
    pub fn minimum() -> f64 {
        10.0 * f64::EPSILON
    }

    /// 允许的最大步长
    pub fn maximum() -> f64 {
        1e+6
    }

    /// 移动到步长`alpha`并重新求值，返回新的试探步是否有效
    pub fn reset(&mut self, alpha: f64) -> bool {
        if !alpha.is_finite() {
            return false;
        }

        let mut x = self.x0.clone();
        x.scaled_add(alpha, self.d);
        let (phi, grad) = self.problem.value_and_grad(&x);

        self.alpha = alpha;
        self.phi = phi;
        self.gphi = grad.dot(self.d);
        self.grad = grad;
        self.is_valid()
    }

    /// 以当前步为模板，在`alpha`处求值；无效时返回`None`
    pub fn at(&self, alpha: f64) -> Option<Self> {
        let mut step = self.clone();
        step.reset(alpha).then_some(step)
    }

    /// 充分下降（Armijo）条件
    pub fn has_armijo(&self, c1: f64) -> bool {
        self.phi <= self.phi0 + self.alpha * c1 * self.gphi0
    }

    /// 曲率（Wolfe）条件
    pub fn has_wolfe(&self, c2: f64) -> bool {
        self.gphi >= c2 * self.gphi0
    }

    /// 强 Wolfe 条件
    pub fn has_strong_wolfe(&self, c2: f64) -> bool {
        self.gphi >= c2 * self.gphi0 && self.gphi <= -c2 * self.gphi0
    }

    /// 近似 Wolfe 条件（见 CG_DESCENT）
    pub fn has_approx_wolfe(&self, c1: f64, c2: f64, epsilon: f64) -> bool {
        (2.0 * c1 - 1.0) * self.gphi0 >= self.gphi
            && self.gphi >= c2 * self.gphi0
            && self.phi <= self.approx_phi(epsilon)
    }

    /// 函数值的近似上界（见 CG_DESCENT）
    pub fn approx_phi(&self, epsilon: f64) -> f64 {
        self.phi0 + epsilon
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn gphi(&self) -> f64 {
        self.gphi
    }

    pub fn phi0(&self) -> f64 {
        self.phi0
    }

    pub fn gphi0(&self) -> f64 {
        self.gphi0
    }

    pub fn grad(&self) -> &Vector {
        &self.grad
    }

    pub fn is_valid(&self) -> bool {
        self.alpha.is_finite() && self.phi.is_finite() && self.gphi.is_finite()
    }

    /// 拆出（步长，函数值，梯度）
    pub fn into_parts(self) -> (f64, f64, Vector) {
        (self.alpha, self.phi, self.grad)
    }
}
