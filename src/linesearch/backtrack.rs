use super::{LineSearchStrategy, LsStep, LsStrategy};

const DECREMENT: f64 = 0.5;
const INCREMENT: f64 = 2.1;
const MAX_ITERATIONS: usize = 64;

/// 回溯线搜索：不满足充分下降或（强）曲率上界时缩小步长，曲率下界不满足时放大步长
#[derive(Debug, Clone)]
pub struct Backtrack {
    strategy: LsStrategy,
}

impl Backtrack {
    /// `strategy`只能是三种回溯变体之一，其余视为 Armijo
    pub fn new(strategy: LsStrategy) -> Self {
        Self { strategy }
    }

    /// 当前试探步应向哪个方向调整：`None`表示可接受
    fn adjust(&self, step: &LsStep, c1: f64, c2: f64) -> Option<f64> {
        if !step.has_armijo(c1) {
            return Some(DECREMENT);
        }
        match self.strategy {
            LsStrategy::BacktrackWolfe if !step.has_wolfe(c2) => Some(INCREMENT),
            LsStrategy::BacktrackStrongWolfe if !step.has_wolfe(c2) => Some(INCREMENT),
            LsStrategy::BacktrackStrongWolfe if !step.has_strong_wolfe(c2) => Some(DECREMENT),
            _ => None,
        }
    }
}

impl LineSearchStrategy for Backtrack {
    fn search<'a>(&mut self, c1: f64, c2: f64, step0: &LsStep<'a>, t0: f64) -> Option<LsStep<'a>> {
        let mut step = step0.clone();
        let mut t = t0;

        for _ in 0..MAX_ITERATIONS {
            if t < LsStep::minimum() || t > LsStep::maximum() {
                return None;
            }

            // 非有限的函数值视为步长过大
            if !step.reset(t) {
                t *= DECREMENT;
                continue;
            }

            match self.adjust(&step, c1, c2) {
                None => return Some(step),
                Some(factor) => t *= factor,
            }
        }

        None
    }
}
