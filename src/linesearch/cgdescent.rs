/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : CG_DESCENT 线搜索
 *
 * 见 "A new conjugate gradient method with guaranteed descent and an efficient line search",
 * Hager & Zhang, 2005。
 * 先满足普通 Wolfe 条件；一旦函数值的变化相对于其量级足够小，切换为近似 Wolfe 条件。
 */

use super::{LineSearchStrategy, LsStep};

const EPSILON: f64 = 1e-6;
const THETA: f64 = 0.5;
const GAMMA: f64 = 0.66;
const DELTA: f64 = 0.7;
const OMEGA: f64 = 1e-3;
const RHO: f64 = 5.0;
const MAX_ITERATIONS: usize = 32;

type Bracket<'a> = (LsStep<'a>, LsStep<'a>);

#[derive(Debug, Clone, Default)]
pub struct CgDescent {
    /// 是否已切换到近似 Wolfe 条件
    approx: bool,
    /// 函数值量级的滑动估计（Q_k 与 C_k）
    sum_q: f64,
    sum_c: f64,
}

impl CgDescent {
    pub fn new() -> Self {
        Self::default()
    }

    fn accepted(&self, step: &LsStep, c1: f64, c2: f64, epsilon: f64) -> bool {
        if self.approx {
            step.has_approx_wolfe(c1, c2, epsilon)
        } else {
            step.has_armijo(c1) && step.has_wolfe(c2)
        }
    }

    fn finalize<'a>(&mut self, step: LsStep<'a>) -> LsStep<'a> {
        if !self.approx {
            self.approx = (step.phi() - step.phi0()).abs() <= OMEGA * self.sum_c;
        }
        step
    }
}

impl LineSearchStrategy for CgDescent {
    fn search<'a>(&mut self, c1: f64, c2: f64, step0: &LsStep<'a>, t0: f64) -> Option<LsStep<'a>> {
        // 初始步长处的函数值非有限时先缩小
        let mut t = t0;
        let c = loop {
            if t < LsStep::minimum() {
                return None;
            }
            match step0.at(t) {
                Some(c) => break c,
                None => t *= 0.5,
            }
        };

        // 估计函数值的量级
        self.sum_q = 1.0 + self.sum_q * DELTA;
        self.sum_c += (step0.phi0().abs() - self.sum_c) / self.sum_q;
        let epsilon = EPSILON * self.sum_c;

        if self.accepted(&c, c1, c2, epsilon) {
            return Some(self.finalize(c));
        }

        let (mut a, mut b) = match bracket(step0, c.clone(), epsilon) {
            Some((a, b)) if (b.alpha() - a.alpha()).abs() >= f64::EPSILON => (a, b),
            _ => (step0.clone(), c),
        };

        for _ in 0..MAX_ITERATIONS {
            if self.accepted(&a, c1, c2, epsilon) {
                return Some(self.finalize(a));
            }
            if self.accepted(&b, c1, c2, epsilon) {
                return Some(self.finalize(b));
            }
            if b.alpha() - a.alpha() <= LsStep::minimum() {
                return None;
            }

            let width = b.alpha() - a.alpha();
            let (aa, bb) = secant2(&a, &b, epsilon)?;
            if bb.alpha() - aa.alpha() > GAMMA * width {
                let c = aa.at(0.5 * (aa.alpha() + bb.alpha()));
                (a, b) = update(aa, bb, c, epsilon)?;
            } else {
                (a, b) = (aa, bb);
            }
        }

        None
    }
}

/// 割线步：φ' 在 a 与 b 之间线性插值的零点；求值失败时退回 a
fn secant<'a>(a: &LsStep<'a>, b: &LsStep<'a>) -> LsStep<'a> {
    let t = (a.alpha() * b.gphi() - b.alpha() * a.gphi()) / (b.gphi() - a.gphi());
    a.at(t).unwrap_or_else(|| a.clone())
}

/// 双割线步
fn secant2<'a>(a: &LsStep<'a>, b: &LsStep<'a>, epsilon: f64) -> Option<Bracket<'a>> {
    let c = secant(a, b);
    let (aa, bb) = update(a.clone(), b.clone(), Some(c.clone()), epsilon)?;

    if (c.alpha() - aa.alpha()).abs() < f64::EPSILON {
        let cc = secant(a, &aa);
        update(aa, bb, Some(cc), epsilon)
    } else if (c.alpha() - bb.alpha()).abs() < f64::EPSILON {
        let cc = secant(b, &bb);
        update(aa, bb, Some(cc), epsilon)
    } else {
        Some((aa, bb))
    }
}

/// 用区间内部的点`c`收缩区间 [a, b]
fn update<'a>(
    a: LsStep<'a>,
    b: LsStep<'a>,
    c: Option<LsStep<'a>>,
    epsilon: f64,
) -> Option<Bracket<'a>> {
    let Some(c) = c else {
        return Some((a, b));
    };

    if c.alpha() <= a.alpha() || c.alpha() >= b.alpha() {
        Some((a, b))
    } else if c.gphi() >= 0.0 {
        Some((a, c))
    } else if c.phi() <= c.approx_phi(epsilon) {
        Some((c, b))
    } else {
        update_u(a, c, epsilon)
    }
}

/// 区间两端都“下降”但右端函数值过大时，用二分恢复区间的不变式
fn update_u<'a>(mut a: LsStep<'a>, mut b: LsStep<'a>, epsilon: f64) -> Option<Bracket<'a>> {
    while b.alpha() - a.alpha() > LsStep::minimum() {
        let c = a.at((1.0 - THETA) * a.alpha() + THETA * b.alpha())?;
        if c.gphi() >= 0.0 {
            return Some((a, c));
        } else if c.phi() <= c.approx_phi(epsilon) {
            a = c;
        } else {
            b = c;
        }
    }

    None
}

/// 从初始试探步`c`出发按 RHO 倍扩张，找到满足区间不变式的初始区间
fn bracket<'a>(step0: &LsStep<'a>, mut c: LsStep<'a>, epsilon: f64) -> Option<Bracket<'a>> {
    let mut history: Vec<LsStep<'a>> = Vec::new();

    for _ in 0..MAX_ITERATIONS {
        if c.gphi() >= 0.0 {
            let a = history
                .iter()
                .rev()
                .find(|s| s.phi() <= s.approx_phi(epsilon))
                .cloned()
                .unwrap_or_else(|| step0.clone());
            return Some((a, c));
        }

        if c.phi() > c.approx_phi(epsilon) {
            return update_u(step0.clone(), c, epsilon);
        }

        let next = c.at(RHO * c.alpha().min(LsStep::maximum()))?;
        history.push(c);
        c = next;
    }

    None
}
