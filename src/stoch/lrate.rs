/// 按步衰减的学习率：α_t = α0 / (1 + decay·t)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningRate {
    alpha0: f64,
    decay: f64,
}

impl LearningRate {
    pub fn new(alpha0: f64, decay: f64) -> Self {
        Self { alpha0, decay }
    }

    /// 不衰减的学习率
    pub fn constant(alpha0: f64) -> Self {
        Self::new(alpha0, 0.0)
    }

    /// 第`t`步（从 0 开始）的学习率
    pub fn at(&self, t: usize) -> f64 {
        self.alpha0 / (1.0 + self.decay * t as f64)
    }

    pub fn alpha0(&self) -> f64 {
        self.alpha0
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }
}
