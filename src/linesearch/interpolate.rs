/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 插值线搜索（满足强 Wolfe 条件）
 *
 * 见 "Numerical optimization", Nocedal & Wright, 2nd edition, p.60（算法 3.5 与 3.6）
 */

use super::{LineSearchStrategy, LsStep};

const MAX_ITERATIONS: usize = 64;
/// 扩张阶段的步长放大倍数
const EXPANSION: f64 = 3.0;
/// 插值点与区间端点之间保留的相对间隔
const MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Default)]
pub struct Interpolation;

impl Interpolation {
    pub fn new() -> Self {
        Self
    }

    /// 在区间 [lo, hi]（端点次序不定）内收缩，直到满足强 Wolfe 条件
    fn zoom<'a>(
        &self,
        c1: f64,
        c2: f64,
        mut lo: LsStep<'a>,
        mut hi: LsStep<'a>,
    ) -> Option<LsStep<'a>> {
        for _ in 0..MAX_ITERATIONS {
            if (lo.alpha() - hi.alpha()).abs() <= LsStep::minimum() {
                break;
            }

            let t = choose(&lo, &hi);
            let step = lo.at(t)?;

            if !step.has_armijo(c1) || step.phi() >= lo.phi() {
                hi = step;
            } else {
                if step.has_strong_wolfe(c2) {
                    return Some(step);
                }
                if step.gphi() * (hi.alpha() - lo.alpha()) >= 0.0 {
                    hi = lo;
                }
                lo = step;
            }
        }

        None
    }
}

impl LineSearchStrategy for Interpolation {
    fn search<'a>(&mut self, c1: f64, c2: f64, step0: &LsStep<'a>, t0: f64) -> Option<LsStep<'a>> {
        let mut prev = step0.clone();
        let mut t = t0;

        for i in 0..MAX_ITERATIONS {
            // 非有限的函数值：退回到上一个试探步与当前步长的中点
            let Some(step) = step0.at(t) else {
                t = 0.5 * (prev.alpha() + t);
                continue;
            };

            if !step.has_armijo(c1) || (i > 0 && step.phi() >= prev.phi()) {
                return self.zoom(c1, c2, prev, step);
            }
            if step.has_strong_wolfe(c2) {
                return Some(step);
            }
            if step.gphi() >= 0.0 {
                return self.zoom(c1, c2, step, prev);
            }

            prev = step;
            t = (t * EXPANSION).min(LsStep::maximum());
        }

        None
    }
}

/// 在二分、二次与三次插值中选出落在区间内部且最靠近`lo`的候选
fn choose(lo: &LsStep, hi: &LsStep) -> f64 {
    let tmin = lo.alpha().min(hi.alpha());
    let tmax = lo.alpha().max(hi.alpha());
    let teps = MARGIN * (tmax - tmin);

    let tb = bisection(lo, hi);
    [quadratic(lo, hi), cubic(lo, hi)]
        .into_iter()
        .filter(|t| t.is_finite() && *t > tmin + teps && *t < tmax - teps)
        .fold(tb, |best, t| {
            if (t - lo.alpha()).abs() < (best - lo.alpha()).abs() {
                t
            } else {
                best
            }
        })
}

pub(crate) fn bisection(lo: &LsStep, hi: &LsStep) -> f64 {
    0.5 * (lo.alpha() + hi.alpha())
}

/// 用 φ(lo)、φ'(lo) 与 φ(hi) 拟合二次函数的极小点
pub(crate) fn quadratic(lo: &LsStep, hi: &LsStep) -> f64 {
    let (a, fa, ga) = (lo.alpha(), lo.phi(), lo.gphi());
    let (b, fb) = (hi.alpha(), hi.phi());
    let dt = b - a;
    a - 0.5 * ga * dt * dt / (fb - fa - ga * dt)
}

/// 用两端的函数值与方向导数拟合三次函数的极小点
pub(crate) fn cubic(lo: &LsStep, hi: &LsStep) -> f64 {
    let (a, fa, ga) = (lo.alpha(), lo.phi(), lo.gphi());
    let (b, fb, gb) = (hi.alpha(), hi.phi(), hi.gphi());

    let d1 = ga + gb - 3.0 * (fa - fb) / (a - b);
    let d2 = (b - a).signum() * (d1 * d1 - ga * gb).sqrt();
    b - (b - a) * (gb + d2 - d1) / (gb - ga + 2.0 * d2)
}
