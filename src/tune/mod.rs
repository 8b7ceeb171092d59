/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 超参数搜索：固定网格（一/二维）与 log10 区间细化（单线程/多线程）
 *
 * 打分函数返回的结果越小越好；相同结果时按参数从小到大取（即结果、参数的字典序）。
 */


use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::errors::{OptimError, OptimResult};

/// log10 搜索每轮的最少采样点数
pub const MIN_SPLITS: usize = 4;

/// 一条搜索记录：(结果, 参数)
#[derive(Debug, Clone)]
struct Record<R> {
    result: R,
    param: f64,
}

impl<R: PartialOrd> Record<R> {
    /// 按（结果, 参数）的字典序比较；无法比较的结果（如 NaN）排在最后
    fn is_better_than(&self, other: &Self) -> bool {
        match self.result.partial_cmp(&other.result) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => self.param < other.param,
            Some(Ordering::Greater) => false,
            None => is_comparable(&self.result) && !is_comparable(&other.result),
        }
    }
}

/// 结果能否与自身比较（NaN 不能）
fn is_comparable<R: PartialOrd>(result: &R) -> bool {
    result.partial_cmp(result).is_some()
}

/// `result`是否严格优于`best`：相等时不替换，NaN 排在最后
fn improves<R: PartialOrd>(result: &R, best: &R) -> bool {
    result < best || (is_comparable(result) && !is_comparable(best))
}

/// 保留更优的记录
fn keep_best<R: PartialOrd>(best: Option<Record<R>>, record: Record<R>) -> Option<Record<R>> {
    match best {
        Some(best) if !record.is_better_than(&best) => Some(best),
        _ => Some(record),
    }
}

/// 在固定网格`params`上逐个求值，返回最优的（结果, 参数）；网格为空时返回`None`
///
/// 结果相同时保留先求值的参数；只有全部结果都是 NaN 时才会返回 NaN。
pub fn tune_fixed<R, P, F>(mut op: F, params: &[P]) -> Option<(R, P)>
where
    R: PartialOrd,
    P: Copy,
    F: FnMut(P) -> R,
{
    let mut best: Option<(R, P)> = None;
    for &param in params {
        let result = op(param);
        match &best {
            Some((best_result, _)) if !improves(&result, best_result) => {}
            _ => best = Some((result, param)),
        }
    }
    best
}

/// 二维固定网格：对`params1 × params2`的每个组合求值，返回最优的（结果, 参数1, 参数2）
pub fn tune_fixed2<R, P1, P2, F>(mut op: F, params1: &[P1], params2: &[P2]) -> Option<(R, P1, P2)>
where
    R: PartialOrd,
    P1: Copy,
    P2: Copy,
    F: FnMut(P1, P2) -> R,
{
    let mut best: Option<(R, P1, P2)> = None;
    for &param1 in params1 {
        if let Some((result, param2)) = tune_fixed(|param2| op(param1, param2), params2) {
            match &best {
                Some((best_result, _, _)) if !improves(&result, best_result) => {}
                _ => best = Some((result, param1, param2)),
            }
        }
    }
    best
}

/// 在`[10^minlog, 10^maxlog]`上按 log10 尺度细化搜索，返回（最优结果, 最优参数）
///
/// 每轮在当前区间上等距取`splits`（至少为[`MIN_SPLITS`]）个点，
/// 然后把区间收缩到当前最优点附近，直到区间宽度不超过`epslog`。
/// `epslog <= 0`或区间本就足够窄时，只在`minlog`处求值一次。
///
/// # 使用示例
/// ```ignore
/// let (f, x) = tune_log10(|x| (x - 0.4) * (x - 0.4) - 1.2, -6.0, 6.0, 1e-6, 10);
/// ```
pub fn tune_log10<R, F>(mut op: F, minlog: f64, maxlog: f64, epslog: f64, splits: usize) -> (R, f64)
where
    R: PartialOrd,
    F: FnMut(f64) -> R,
{
    let splits = splits.max(MIN_SPLITS);
    let (mut minlog, mut maxlog) = (minlog, maxlog);
    let mut best: Option<Record<R>> = None;

    while maxlog - minlog > epslog && epslog > 0.0 {
        let varlog = (maxlog - minlog) / (splits - 1) as f64;
        for i in 0..splits {
            let log = minlog + i as f64 * varlog;
            best = keep_best(best, Record {
                result: op(10f64.powf(log)),
                param: log,
            });
        }
        (minlog, maxlog) = narrow(best.as_ref(), minlog, varlog, splits);
    }

    finish(best, || op(10f64.powf(minlog)), minlog)
}

/// [`tune_log10`]的多线程版本：每轮的采样点在`pool`中并行求值
///
/// 轮与轮之间严格串行：一轮的全部求值结束后才选出最优点并开始下一轮。
/// 结果只取决于（结果, 参数）的字典序，与线程调度无关。
pub fn tune_log10_mt<R, F>(
    op: F,
    minlog: f64,
    maxlog: f64,
    epslog: f64,
    splits: usize,
    pool: &ThreadPool,
) -> (R, f64)
where
    R: PartialOrd + Send,
    F: Fn(f64) -> R + Sync,
{
    let splits = splits.max(MIN_SPLITS);
    let (mut minlog, mut maxlog) = (minlog, maxlog);
    let mut best: Option<Record<R>> = None;

    while maxlog - minlog > epslog && epslog > 0.0 {
        let varlog = (maxlog - minlog) / (splits - 1) as f64;
        let records = Mutex::new(Vec::with_capacity(splits));
        pool.install(|| {
            (0..splits).into_par_iter().for_each(|i| {
                let log = minlog + i as f64 * varlog;
                let result = op(10f64.powf(log));
                records
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(Record { result, param: log });
            });
        });

        let records = records.into_inner().unwrap_or_else(PoisonError::into_inner);
        for record in records {
            best = keep_best(best, record);
        }
        (minlog, maxlog) = narrow(best.as_ref(), minlog, varlog, splits);
    }

    finish(best, || op(10f64.powf(minlog)), minlog)
}

/// 以当前最优点为中心收缩区间
fn narrow<R>(best: Option<&Record<R>>, minlog: f64, varlog: f64, splits: usize) -> (f64, f64) {
    let center = best.map_or(minlog, |record| record.param);
    let half = varlog * (splits - 1) as f64 / splits as f64;
    (center - half, center + half)
}

fn finish<R, F>(best: Option<Record<R>>, op: F, minlog: f64) -> (R, f64)
where
    F: FnOnce() -> R,
{
    match best {
        Some(record) => (record.result, 10f64.powf(record.param)),
        None => {
            log::debug!("搜索区间已不大于精度，只在10^{minlog}处求值一次");
            (op(), 10f64.powf(minlog))
        }
    }
}

/// 创建`threads`个线程的线程池
pub fn make_pool(threads: usize) -> OptimResult<ThreadPool> {
    if threads == 0 {
        return Err(OptimError::InvalidConfig("线程数必须为正".to_string()));
    }
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| OptimError::ThreadPool(err.to_string()))
}
