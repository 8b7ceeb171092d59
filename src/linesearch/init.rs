use super::LsInitializer;
use crate::state::State;

/// 线搜索初始步长
///
/// 见 "Numerical optimization", Nocedal & Wright, 2nd edition, p.59
pub struct LsInit {
    kind: LsInitializer,
    first: bool,
    /// 上一次迭代起点的函数值
    prev_f: f64,
    /// 上一次迭代起点的方向导数
    prev_gphi: f64,
    /// 上一次被接受的步长
    prev_t: f64,
}

impl LsInit {
    pub fn new(kind: LsInitializer) -> Self {
        Self {
            kind,
            first: true,
            prev_f: 0.0,
            prev_gphi: 0.0,
            prev_t: 1.0,
        }
    }

    pub const fn kind(&self) -> LsInitializer {
        self.kind
    }

    /// 根据当前状态（方向`d`已确定）给出初始步长
    pub fn initial(&mut self, state: &State) -> f64 {
        let gphi = state.d.dot(&state.g);

        let t0 = match self.kind {
            LsInitializer::Unit => 1.0,
            _ if self.first => Self::first_step(state),
            LsInitializer::Quadratic => (1.01 * 2.0 * (state.f - self.prev_f) / gphi).min(1.0),
            LsInitializer::Consistent => self.prev_t * self.prev_gphi / gphi,
        };

        self.first = false;
        self.prev_f = state.f;
        self.prev_gphi = gphi;

        if t0.is_finite() && t0 > 0.0 {
            t0
        } else {
            Self::first_step(state)
        }
    }

    /// 记录被接受的步长
    pub fn accepted(&mut self, t: f64) {
        self.prev_t = t;
    }

    fn first_step(state: &State) -> f64 {
        let gmax = state.g.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if gmax > 0.0 { (1.0 / gmax).min(1.0) } else { 1.0 }
    }
}
