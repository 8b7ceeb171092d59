/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 随机（小批量）求解器：SG、SGA、SIA、AG、AGGR、ADAGRAD、ADADELTA
 *
 * 每个 epoch 执行`epoch_size`步更新，每步向目标函数要一次（随机的）梯度估计；
 * 目标函数在两次调用之间换成新的小批量是调用方的事。
 * epoch 结束时用完整的`value_and_grad`评估报告点，保留函数值最小的状态。
 */

mod adaptive;
mod ag;
mod lrate;
mod params;
mod sg;

#[cfg(test)]
mod tests;

pub use adaptive::{Adadelta, Adagrad};
pub use ag::Ag;
pub use lrate::LearningRate;
pub use params::StochParams;
pub use sg::{Sg, Sga, Sia};

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::callbacks::Callbacks;
use crate::errors::{OptimError, OptimResult};
use crate::impl_enum_names;
use crate::problem::{Function, Problem, Vector};
use crate::state::{State, Status};
use crate::tune::tune_fixed2;

/// 超参数搜索的初始学习率网格
pub const TUNE_ALPHA0S: [f64; 3] = [1e-3, 1e-2, 1e-1];
/// 超参数搜索的衰减系数网格
pub const TUNE_DECAYS: [f64; 5] = [0.10, 0.20, 0.50, 0.75, 1.00];

/// 随机求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum StochOptimizer {
    Sg,
    Sga,
    Sia,
    Ag,
    Aggr,
    Adagrad,
    Adadelta,
}

impl_enum_names!(StochOptimizer, "随机求解器", [
    (Sg, "sg"),
    (Sga, "sga"),
    (Sia, "sia"),
    (Ag, "ag"),
    (Aggr, "aggr"),
    (Adagrad, "adagrad"),
    (Adadelta, "adadelta"),
]);

impl StochOptimizer {
    /// 是否使用初始学习率（ADADELTA 的学习率固定为 1）
    pub const fn uses_alpha0(&self) -> bool {
        !matches!(self, Self::Adadelta)
    }

    /// 是否使用衰减系数（ADAGRAD/ADADELTA 的步长由梯度累积量自行调整）
    pub const fn uses_decay(&self) -> bool {
        !matches!(self, Self::Adagrad | Self::Adadelta)
    }

    /// 从`x0`创建更新器
    pub fn stepper(&self, x0: Vector, alpha0: f64, decay: f64) -> Stepper {
        let lrate = LearningRate::new(alpha0, decay);
        match self {
            Self::Sg => Sg::new(x0, lrate).into(),
            Self::Sga => Sga::new(x0, lrate).into(),
            Self::Sia => Sia::new(x0, lrate).into(),
            Self::Ag => Ag::new(x0, lrate).into(),
            Self::Aggr => Ag::with_gradient_restart(x0, lrate).into(),
            Self::Adagrad => Adagrad::new(x0, alpha0).into(),
            Self::Adadelta => Adadelta::new(x0).into(),
        }
    }
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Stepper {
    Sg(Sg),
    Sga(Sga),
    Sia(Sia),
    Ag(Ag),
    Adagrad(Adagrad),
    Adadelta(Adadelta),
}

#[enum_dispatch(Stepper)]
pub trait StochStep {
    /// 下一步需要梯度估计的点
    fn query(&self) -> &Vector;

    /// 用`query()`处的梯度估计`g`更新一步
    fn step(&mut self, g: &Vector);

    /// 当前报告的解（平均类方法为平均点）
    fn solution(&self) -> &Vector;
}

/// 从`x0`出发随机最小化`function`
///
/// 每个 epoch 结束时：
/// 1. 报告点出现非有限值 → 发出警告并提前结束（保留此前最好的状态）；
/// 2. 用完整的函数值与梯度评估报告点，比之前更好则保留；
/// 3. 最好状态满足收敛判据，或进度回调返回`false` → `Converged`。
///
/// 跑完全部 epoch 仍未收敛时状态为`MaxIterations`。
pub fn minimize(
    function: &dyn Function,
    x0: Vector,
    optimizer: StochOptimizer,
    params: &StochParams,
    callbacks: &mut Callbacks,
) -> OptimResult<State> {
    params.validate()?;
    if x0.len() != function.size() {
        return Err(OptimError::DimensionMismatch {
            expected: function.size(),
            got: x0.len(),
        });
    }

    let problem = Problem::new(function);
    let mut state = State::new(&problem, x0.clone());
    let mut stepper = optimizer.stepper(x0, params.alpha0, params.decay);

    log::debug!(
        "{optimizer}: {}个epoch × {}步，alpha0={:e}，decay={}",
        params.epochs,
        params.epoch_size,
        params.alpha0,
        params.decay
    );

    for epoch in 1..=params.epochs {
        for _ in 0..params.epoch_size {
            let (_, g) = problem.value_and_grad(stepper.query());
            stepper.step(&g);
        }

        let mut current = State::new(&problem, stepper.solution().clone());
        current.iterations = epoch * params.epoch_size;
        if !current.is_finite() {
            callbacks.warn(&format!(
                "{optimizer}: 第{epoch}个epoch发散（f={:e}），保留此前最好的状态",
                current.f
            ));
            break;
        }
        state.improve(&current);

        log::debug!(
            "{optimizer}: epoch{epoch} f={:e} 最优f={:e} 判据={:e}",
            current.f,
            state.f,
            state.convergence_criteria()
        );

        if state.converged(params.epsilon) {
            state.status = Status::Converged;
            break;
        }
        if !callbacks.update(&state) {
            state.status = Status::Converged;
            break;
        }
    }

    if !state.status.is_terminal() {
        state.status = Status::MaxIterations;
    }
    state.sync_calls(&problem);
    log::info!(
        "{optimizer}: {}，{}步，f={:e}，函数调用{}次，梯度调用{}次",
        state.status,
        state.iterations,
        state.f,
        state.fcalls,
        state.gcalls
    );
    Ok(state)
}

/// 在固定网格上为`optimizer`选择（初始学习率, 衰减系数）
///
/// 每个组合用[`StochParams::tunable`]缩短后的参数跑一次，按最终函数值取最优。
/// 求解器不使用的参数不参与搜索（保持`params`中的值）。
pub fn tune(
    function: &dyn Function,
    x0: &Vector,
    optimizer: StochOptimizer,
    params: &StochParams,
) -> OptimResult<(f64, f64)> {
    params.validate()?;
    let tunable = params.tunable();

    let (fixed_alpha0, fixed_decay) = ([params.alpha0], [params.decay]);
    let alpha0s: &[f64] = if optimizer.uses_alpha0() {
        &TUNE_ALPHA0S
    } else {
        &fixed_alpha0
    };
    let decays: &[f64] = if optimizer.uses_decay() {
        &TUNE_DECAYS
    } else {
        &fixed_decay
    };

    let mut failure = None;
    let best = tune_fixed2(
        |alpha0, decay| {
            let trial = tunable.clone().with_alpha0(alpha0).with_decay(decay);
            // 自己的警告不打扰调用方；失败的组合视为最差
            let mut quiet = Callbacks::new().with_wlog(|message| log::debug!("{message}"));
            match minimize(function, x0.clone(), optimizer, &trial, &mut quiet) {
                Ok(state) if state.f.is_finite() => state.f,
                Ok(_) => f64::INFINITY,
                Err(err) => {
                    failure = Some(err);
                    f64::INFINITY
                }
            }
        },
        alpha0s,
        decays,
    );

    if let Some(err) = failure {
        return Err(err);
    }
    let (f, alpha0, decay) = best.ok_or_else(|| {
        OptimError::InvalidConfig(format!("{optimizer}没有可搜索的超参数组合"))
    })?;
    log::info!("{optimizer}: 超参数搜索选中alpha0={alpha0:e}，decay={decay}（f={f:e}）");
    Ok((alpha0, decay))
}

/// 先用[`tune`]选出超参数，再用完整参数求解
pub fn minimize_tuned(
    function: &dyn Function,
    x0: Vector,
    optimizer: StochOptimizer,
    params: &StochParams,
    callbacks: &mut Callbacks,
) -> OptimResult<State> {
    let (alpha0, decay) = tune(function, &x0, optimizer, params)?;
    let tuned = params.clone().with_alpha0(alpha0).with_decay(decay);
    minimize(function, x0, optimizer, &tuned, callbacks)
}
