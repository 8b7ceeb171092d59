/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 线搜索：初始步长策略 + 步长搜索策略
 *
 * 给定当前点 x、梯度 g 与下降方向 d，在 φ(t) = f(x + t·d) 上寻找满足
 * Armijo/Wolfe 一类条件的步长 t > 0。搜索成功则把状态移动到新点。
 */

mod backtrack;
mod cgdescent;
mod init;
mod interpolate;
mod step;

#[cfg(test)]
mod tests;

pub use backtrack::Backtrack;
pub use cgdescent::CgDescent;
pub use init::LsInit;
pub use interpolate::Interpolation;
pub use step::LsStep;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::impl_enum_names;
use crate::problem::Problem;
use crate::state::State;

/// 初始步长策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LsInitializer {
    /// 恒为 1
    Unit,
    /// 以上一次迭代的函数值下降量拟合二次函数
    Quadratic,
    /// 保持一阶变化量与上一次迭代一致
    Consistent,
}

impl_enum_names!(LsInitializer, "线搜索初始化策略", [
    (Unit, "init-unit"),
    (Quadratic, "init-quadratic"),
    (Consistent, "init-consistent"),
]);

/// 步长搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LsStrategy {
    BacktrackArmijo,
    BacktrackWolfe,
    BacktrackStrongWolfe,
    Interpolation,
    CgDescent,
}

impl_enum_names!(LsStrategy, "线搜索策略", [
    (BacktrackArmijo, "backtrack-armijo"),
    (BacktrackWolfe, "backtrack-wolfe"),
    (BacktrackStrongWolfe, "backtrack-strong-wolfe"),
    (Interpolation, "interpolation"),
    (CgDescent, "cg-descent"),
]);

/// 步长搜索策略的统一接口
#[enum_dispatch]
pub trait LineSearchStrategy {
    /// 从`step0`（α = 0）出发、以`t0`为初始步长搜索；失败返回`None`
    fn search<'a>(&mut self, c1: f64, c2: f64, step0: &LsStep<'a>, t0: f64) -> Option<LsStep<'a>>;
}

#[enum_dispatch(LineSearchStrategy)]
#[derive(Debug, Clone)]
pub enum Strategy {
    Backtrack,
    Interpolation,
    CgDescent,
}

impl From<LsStrategy> for Strategy {
    fn from(kind: LsStrategy) -> Self {
        match kind {
            LsStrategy::BacktrackArmijo
            | LsStrategy::BacktrackWolfe
            | LsStrategy::BacktrackStrongWolfe => Backtrack::new(kind).into(),
            LsStrategy::Interpolation => Interpolation::new().into(),
            LsStrategy::CgDescent => CgDescent::new().into(),
        }
    }
}

/// 线搜索：组合初始步长与搜索策略，跨迭代保存各自的状态
pub struct LineSearch {
    init: LsInit,
    strategy: Strategy,
    c1: f64,
    c2: f64,
}

impl LineSearch {
    /// 需满足 0 < c1 < c2 < 1（由参数校验保证）
    pub fn new(initializer: LsInitializer, strategy: LsStrategy, c1: f64, c2: f64) -> Self {
        Self {
            init: LsInit::new(initializer),
            strategy: strategy.into(),
            c1,
            c2,
        }
    }

    /// 沿`state.d`搜索步长，成功则把状态移动到新点并返回`true`
    ///
    /// `state.d`不是下降方向或找不到可接受的步长时返回`false`，状态保持不变。
    pub fn update(&mut self, problem: &Problem, state: &mut State) -> bool {
        let gphi0 = state.d.dot(&state.g);
        if !(gphi0 < 0.0) {
            return false;
        }

        let t0 = self.init.initial(state);
        let found = {
            let step0 = LsStep::new(problem, state);
            self.strategy
                .search(self.c1, self.c2, &step0, t0)
                .map(LsStep::into_parts)
        };

        match found {
            Some((t, f, g)) if t > 0.0 && f.is_finite() => {
                self.init.accepted(t);
                state.update_step(problem, t, f, g);
                true
            }
            _ => false,
        }
    }
}
