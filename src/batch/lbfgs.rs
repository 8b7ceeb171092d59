use super::{DescentDirection, History};
use crate::problem::Vector;
use crate::state::State;

/// L-BFGS：在有界历史上做双循环递归，近似 -H·g 而不显式构造 H
///
/// 见 "Numerical optimization", Nocedal & Wright, 2nd edition, p.178（算法 7.4）
#[derive(Debug, Clone)]
pub struct Lbfgs {
    history: History,
}

impl Lbfgs {
    pub fn new(history_size: usize) -> Self {
        Self {
            history: History::new(history_size),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl DescentDirection for Lbfgs {
    fn direction(&mut self, prev: Option<&State>, curr: &State) -> Vector {
        if let Some(prev) = prev {
            let s = &curr.x - &prev.x;
            let y = &curr.g - &prev.g;
            if !self.history.push(s, y) {
                log::debug!("lbfgs: 第{}次迭代的曲率非正，跳过该修正量", curr.iterations);
            }
        }

        let mut q = curr.g.clone();
        let mut alphas = Vec::with_capacity(self.history.len());
        for pair in self.history.iter().rev() {
            let alpha = pair.rho * pair.s.dot(&q);
            q.scaled_add(-alpha, &pair.y);
            alphas.push(alpha);
        }

        // 以最新一对修正量估计初始 Hessian 的尺度
        let mut r = match self.history.newest() {
            Some(pair) => q * (pair.s.dot(&pair.y) / pair.y.dot(&pair.y)),
            None => q,
        };

        for (pair, alpha) in self.history.iter().zip(alphas.iter().rev()) {
            let beta = pair.rho * pair.y.dot(&r);
            r.scaled_add(alpha - beta, &pair.s);
        }

        -r
    }
}
