/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 非线性共轭梯度：d = -g + β·d_prev
 *
 * β 的各种公式见 "A survey of nonlinear conjugate gradient methods", Hager & Zhang, 2006。
 * 记 y = g - g_prev。
 */

use super::DescentDirection;
use crate::problem::Vector;
use crate::state::State;

/// β 公式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CgdFormula {
    /// Conjugate Descent (Fletcher)
    Cd,
    /// Dai–Yuan
    Dy,
    /// Fletcher–Reeves
    Fr,
    /// Hestenes–Stiefel
    Hs,
    /// Liu–Storey
    Ls,
    /// Hager–Zhang（截断版）
    N,
    /// Polak–Ribière–Polyak（截断为非负）
    Prp,
    /// DY 与 CD 的混合
    Dycd,
    /// DY 与 HS 的混合
    Dyhs,
}

impl CgdFormula {
    pub fn beta(&self, prev: &State, curr: &State) -> f64 {
        let (g, gp, dp) = (&curr.g, &prev.g, &prev.d);
        let y = g - gp;

        let gg = g.dot(g);
        let gy = g.dot(&y);
        let dy = dp.dot(&y);
        let dgp = dp.dot(gp);
        let gpgp = gp.dot(gp);

        match self {
            Self::Cd => gg / -dgp,
            Self::Dy => gg / dy,
            Self::Fr => gg / gpgp,
            Self::Hs => gy / dy,
            Self::Ls => gy / -dgp,
            Self::N => {
                let div = 1.0 / dy;
                let mut v = y.clone();
                v.scaled_add(-2.0 * y.dot(&y) * div, dp);
                let pos = div * v.dot(g);
                let eta = -1.0 / (dp.dot(dp).sqrt() * 0.01_f64.min(gpgp.sqrt()));
                pos.max(eta)
            }
            Self::Prp => (gy / gpgp).max(0.0),
            Self::Dycd => gg / dy.max(-dgp),
            Self::Dyhs => (gg / dy).min(gy / dy).max(0.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cgd {
    formula: CgdFormula,
}

impl Cgd {
    pub fn new(formula: CgdFormula) -> Self {
        Self { formula }
    }

    pub const fn formula(&self) -> CgdFormula {
        self.formula
    }
}

impl DescentDirection for Cgd {
    fn direction(&mut self, prev: Option<&State>, curr: &State) -> Vector {
        let Some(prev) = prev else {
            return -&curr.g;
        };

        let beta = self.formula.beta(prev, curr);
        let mut d = -&curr.g;
        if beta.is_finite() {
            d.scaled_add(beta, &prev.d);
        } else {
            log::debug!("cgd-{:?}: β非有限，重新从最速下降方向开始", self.formula);
        }
        d
    }
}
