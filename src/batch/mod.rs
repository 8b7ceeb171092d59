/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 批量（全梯度）求解器：GD、非线性共轭梯度族、L-BFGS
 *
 * 每次迭代：收敛检查 → 迭代上限检查 → 计算下降方向 → 线搜索 → 更新状态 → 进度回调。
 * 每次调用`minimize`都拥有各自的状态与 CG/L-BFGS 记忆，互不共享。
 */

mod cgd;
mod gd;
mod history;
mod lbfgs;
mod params;

#[cfg(test)]
mod tests;

pub use cgd::{Cgd, CgdFormula};
pub use gd::Gd;
pub use history::{CurvaturePair, History};
pub use lbfgs::Lbfgs;
pub use params::BatchParams;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::callbacks::Callbacks;
use crate::errors::{OptimError, OptimResult};
use crate::impl_enum_names;
use crate::linesearch::{LineSearch, LsInitializer, LsStrategy};
use crate::problem::{Function, Problem, Vector};
use crate::state::{State, Status};

/// 批量求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BatchOptimizer {
    Gd,
    /// 默认的共轭梯度（等同于`CgdN`）
    Cgd,
    CgdCd,
    CgdDy,
    CgdFr,
    CgdHs,
    CgdLs,
    CgdPrp,
    CgdN,
    CgdDycd,
    CgdDyhs,
    Lbfgs,
}

impl_enum_names!(BatchOptimizer, "批量求解器", [
    (Gd, "gd"),
    (Cgd, "cgd"),
    (CgdCd, "cgd-cd"),
    (CgdDy, "cgd-dy"),
    (CgdFr, "cgd-fr"),
    (CgdHs, "cgd-hs"),
    (CgdLs, "cgd-ls"),
    (CgdPrp, "cgd-prp"),
    (CgdN, "cgd-n"),
    (CgdDycd, "cgd-dycd"),
    (CgdDyhs, "cgd-dyhs"),
    (Lbfgs, "lbfgs"),
]);

impl BatchOptimizer {
    /// 共轭梯度公式（非 CG 求解器返回`None`）
    pub const fn cgd_formula(&self) -> Option<CgdFormula> {
        match self {
            Self::Gd | Self::Lbfgs => None,
            Self::Cgd | Self::CgdN => Some(CgdFormula::N),
            Self::CgdCd => Some(CgdFormula::Cd),
            Self::CgdDy => Some(CgdFormula::Dy),
            Self::CgdFr => Some(CgdFormula::Fr),
            Self::CgdHs => Some(CgdFormula::Hs),
            Self::CgdLs => Some(CgdFormula::Ls),
            Self::CgdPrp => Some(CgdFormula::Prp),
            Self::CgdDycd => Some(CgdFormula::Dycd),
            Self::CgdDyhs => Some(CgdFormula::Dyhs),
        }
    }

    /// 默认的线搜索（初始化策略，搜索策略）
    pub const fn default_line_search(&self) -> (LsInitializer, LsStrategy) {
        match self {
            Self::Gd => (LsInitializer::Quadratic, LsStrategy::BacktrackWolfe),
            Self::CgdCd => (LsInitializer::Unit, LsStrategy::Interpolation),
            Self::CgdDy | Self::CgdDycd | Self::CgdDyhs => {
                (LsInitializer::Quadratic, LsStrategy::CgDescent)
            }
            Self::Lbfgs => (LsInitializer::Unit, LsStrategy::Interpolation),
            _ => (LsInitializer::Quadratic, LsStrategy::Interpolation),
        }
    }

    /// 默认的曲率条件系数：CG 需要更精确的线搜索
    pub const fn default_c2(&self) -> f64 {
        match self.cgd_formula() {
            Some(_) => 0.1,
            None => 0.9,
        }
    }

    /// 创建求解器（持有本次求解的方向记忆）
    pub fn solver(&self, history_size: usize) -> Solver {
        match (self, self.cgd_formula()) {
            (Self::Lbfgs, _) => Lbfgs::new(history_size).into(),
            (_, Some(formula)) => Cgd::new(formula).into(),
            _ => Gd.into(),
        }
    }
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Solver {
    Gd(Gd),
    Cgd(Cgd),
    Lbfgs(Lbfgs),
}

#[enum_dispatch(Solver)]
pub trait DescentDirection {
    /// 计算下降方向；`prev`为上一次被接受的迭代（首次迭代为`None`）
    fn direction(&mut self, prev: Option<&State>, curr: &State) -> Vector;
}

/// 方向`d`相对梯度的最小长度，更短的方向视为相消后剩下的舍入噪声
const MIN_DIRECTION_RATIO: f64 = 1e-8;

/// `d`是否为数值上可用的下降方向：gᵀd < 0 且 ‖d‖ 不小于 ‖g‖ 的[`MIN_DIRECTION_RATIO`]倍
///
/// 例如 HS 公式在球函数上走过一次非精确步后，β·d_prev 恰好抵消 -g，
/// 得到的 d 只剩舍入误差，gᵀd 虽为负但任何线搜索都找不到可接受的步长。
pub(crate) fn is_descent(d: &Vector, g: &Vector) -> bool {
    let (dnorm, gnorm) = (d.dot(d).sqrt(), g.dot(g).sqrt());
    d.dot(g) < 0.0 && dnorm >= MIN_DIRECTION_RATIO * gnorm
}

/// 从`x0`出发最小化`function`
///
/// 参数错误或`x0`维度不符时返回`Err`；求解本身的结果（收敛、迭代上限、线搜索失败）
/// 记录在返回状态的`status`中。
pub fn minimize(
    function: &dyn Function,
    x0: Vector,
    optimizer: BatchOptimizer,
    params: &BatchParams,
    callbacks: &mut Callbacks,
) -> OptimResult<State> {
    params.validate()?;
    if x0.len() != function.size() {
        return Err(OptimError::DimensionMismatch {
            expected: function.size(),
            got: x0.len(),
        });
    }

    let (initializer, strategy) = optimizer.default_line_search();
    let initializer = params.ls_initializer.unwrap_or(initializer);
    let strategy = params.ls_strategy.unwrap_or(strategy);
    let c2 = params.c2.unwrap_or(optimizer.default_c2());
    if params.c1 >= c2 {
        return Err(OptimError::InvalidConfig(format!(
            "{optimizer}的线搜索系数需满足c1 < c2，实际为c1={}，c2={c2}",
            params.c1
        )));
    }

    let problem = Problem::new(function);
    let mut solver = optimizer.solver(params.history_size);
    let mut linesearch = LineSearch::new(initializer, strategy, params.c1, c2);
    let mut state = State::new(&problem, x0);
    let mut prev: Option<State> = None;

    log::debug!("{optimizer}: 线搜索 {initializer} + {strategy}，c1={}，c2={c2}", params.c1);

    loop {
        if state.converged(params.epsilon) {
            state.status = Status::Converged;
            break;
        }
        if state.iterations >= params.max_iterations {
            state.status = Status::MaxIterations;
            break;
        }

        let mut d = solver.direction(prev.as_ref(), &state);
        if !is_descent(&d, &state.g) {
            log::debug!("{optimizer}: 第{}次迭代的方向不是下降方向，改用最速下降", state.iterations);
            d = -&state.g;
        }
        state.d = d;

        let snapshot = state.clone();
        if !linesearch.update(&problem, &mut state) {
            state.status = Status::LineSearchFailed;
            callbacks.warn(&format!(
                "{optimizer}: 第{}次迭代线搜索失败（f={:e}，判据={:e}）",
                state.iterations,
                state.f,
                state.convergence_criteria()
            ));
            break;
        }
        prev = Some(snapshot);

        log::debug!(
            "{optimizer}: 迭代{} f={:e} 判据={:e} t={:e}",
            state.iterations,
            state.f,
            state.convergence_criteria(),
            state.t
        );

        if !callbacks.update(&state) {
            state.status = Status::Converged;
            break;
        }
    }

    state.sync_calls(&problem);
    log::info!(
        "{optimizer}: {}，迭代{}次，f={:e}，函数调用{}次，梯度调用{}次",
        state.status,
        state.iterations,
        state.f,
        state.fcalls,
        state.gcalls
    );
    Ok(state)
}
