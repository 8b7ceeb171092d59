/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 求解器基准：在线程池中并行地从随机起点多次求解，汇总各（测试函数, 求解器）的统计
 *
 * 每个任务各自拥有求解状态，只有最后的统计汇总需要加锁。
 */

mod stats;

#[cfg(test)]
mod tests;

pub use stats::Stats;

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::batch::{self, BatchOptimizer, BatchParams};
use crate::callbacks::Callbacks;
use crate::errors::{OptimError, OptimResult};
use crate::functions::TestFunction;
use crate::problem::Vector;
use crate::state::{State, Status};
use crate::tune::make_pool;

/// 基准配置
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// 每个测试函数的随机起点个数
    pub trials: usize,
    pub threads: usize,
    /// 随机起点的种子
    pub seed: u64,
    pub params: BatchParams,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: 16,
            threads: 4,
            seed: 0,
            params: BatchParams::default(),
        }
    }
}

/// 某个（测试函数, 求解器）组合的统计
#[derive(Debug, Clone, Default)]
pub struct BenchStats {
    /// 终止时的收敛判据
    pub criterion: Stats<f64>,
    /// 未收敛（迭代上限或线搜索失败）的次数
    pub failures: usize,
    pub iterations: Stats<f64>,
    pub fcalls: Stats<f64>,
    pub gcalls: Stats<f64>,
}

impl BenchStats {
    /// 记录一次求解的结果
    pub fn push(&mut self, state: &State) {
        self.criterion.push(state.convergence_criteria());
        self.iterations.push(state.iterations as f64);
        self.fcalls.push(state.fcalls as f64);
        self.gcalls.push(state.gcalls as f64);
        if state.status != Status::Converged {
            self.failures += 1;
        }
    }

    /// 合并另一组统计
    pub fn merge(&mut self, other: &Self) {
        self.criterion.merge(&other.criterion);
        self.failures += other.failures;
        self.iterations.merge(&other.iterations);
        self.fcalls.merge(&other.fcalls);
        self.gcalls.merge(&other.gcalls);
    }
}

/// 以（测试函数名, 求解器）为键的基准结果
pub type BenchReport = BTreeMap<(String, BatchOptimizer), BenchStats>;

/// 第`trial`个随机起点：各分量在 [-1, 1) 内均匀分布
pub fn random_start(seed: u64, trial: usize, dims: usize) -> Vector {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
    Array1::from_shape_fn(dims, |_| rng.gen_range(-1.0..1.0))
}

/// 对每个测试函数、每个随机起点、每个求解器求解一次，并行执行
pub fn run(
    functions: &[Box<dyn TestFunction>],
    optimizers: &[BatchOptimizer],
    config: &BenchConfig,
) -> OptimResult<BenchReport> {
    if config.trials == 0 {
        return Err(OptimError::InvalidConfig("随机起点个数必须为正".to_string()));
    }
    config.params.validate()?;
    let pool = make_pool(config.threads)?;

    let tasks: Vec<(usize, usize)> = (0..functions.len())
        .flat_map(|f| (0..config.trials).map(move |trial| (f, trial)))
        .collect();

    let report = Mutex::new(BenchReport::new());
    let failure = Mutex::new(None);

    pool.install(|| {
        tasks.into_par_iter().for_each(|(f, trial)| {
            let function = &functions[f];
            let x0 = random_start(config.seed, trial, function.size());
            let mut local = Vec::with_capacity(optimizers.len());

            for &optimizer in optimizers {
                let result = batch::minimize(
                    &**function,
                    x0.clone(),
                    optimizer,
                    &config.params,
                    &mut Callbacks::new(),
                );
                let state = match result {
                    Ok(state) => state,
                    Err(err) => {
                        let mut failure = failure.lock().unwrap_or_else(PoisonError::into_inner);
                        if failure.is_none() {
                            *failure = Some(err);
                        }
                        continue;
                    }
                };

                let mut stats = BenchStats::default();
                stats.push(&state);
                local.push((optimizer, stats));
            }

            // 任务内的结果一次性合并，锁只在这里持有
            let mut report = report.lock().unwrap_or_else(PoisonError::into_inner);
            for (optimizer, stats) in local {
                report.entry((function.name(), optimizer)).or_default().merge(&stats);
            }
        });
    });

    if let Some(err) = failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
        return Err(err);
    }
    let report = report.into_inner().unwrap_or_else(PoisonError::into_inner);

    for ((name, optimizer), stats) in &report {
        log::info!(
            "{name} {optimizer}: 判据均值={:e}，失败{}/{}，迭代{:.1}±{:.1}，函数调用共{}次（平均{:.1}），梯度调用共{}次",
            stats.criterion.avg(),
            stats.failures,
            stats.criterion.count(),
            stats.iterations.avg(),
            stats.iterations.stdev(),
            stats.fcalls.sum(),
            stats.fcalls.avg(),
            stats.gcalls.sum()
        );
    }
    Ok(report)
}
