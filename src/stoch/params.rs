use serde::{Deserialize, Serialize};

use crate::errors::{OptimError, OptimResult};
use crate::state::Epsilon;

/// 随机求解器参数
///
/// 总步数为`epochs · epoch_size`，每步消耗一次随机梯度估计。
///
/// # 使用示例
/// ```ignore
/// let params = StochParams::default().with_epochs(50).with_alpha0(1e-2);
/// let params = StochParams::from_json(r#"{"epochs": 10, "epoch_size": 200}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochParams {
    pub epochs: usize,
    /// 每个 epoch 的更新步数
    pub epoch_size: usize,
    /// 初始学习率
    pub alpha0: f64,
    /// 学习率衰减系数
    pub decay: f64,
    /// 收敛精度（相对梯度范数）
    pub epsilon: f64,
}

impl Default for StochParams {
    fn default() -> Self {
        Self {
            epochs: 20,
            epoch_size: 50,
            alpha0: 1e-1,
            decay: 1e-1,
            epsilon: Epsilon::Normal.value(),
        }
    }
}

impl StochParams {
    /// 从 JSON 读取参数（缺省字段取默认值），并校验
    pub fn from_json(json: &str) -> OptimResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> OptimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_epoch_size(mut self, epoch_size: usize) -> Self {
        self.epoch_size = epoch_size;
        self
    }

    pub fn with_alpha0(mut self, alpha0: f64) -> Self {
        self.alpha0 = alpha0;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// 超参数搜索用的缩短版本：只跑一个 epoch
    pub fn tunable(&self) -> Self {
        Self {
            epochs: 1,
            ..self.clone()
        }
    }

    /// 参数校验
    pub fn validate(&self) -> OptimResult<()> {
        if self.epochs == 0 {
            return Err(OptimError::InvalidConfig("epoch数必须为正".to_string()));
        }
        if self.epoch_size == 0 {
            return Err(OptimError::InvalidConfig("每个epoch的步数必须为正".to_string()));
        }
        if !(self.alpha0.is_finite() && self.alpha0 > 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "初始学习率必须为正的有限值，实际为{}",
                self.alpha0
            )));
        }
        if !(self.decay.is_finite() && self.decay >= 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "学习率衰减系数必须为非负的有限值，实际为{}",
                self.decay
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "收敛精度必须为正的有限值，实际为{}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
