use serde::{Deserialize, Serialize};

use crate::errors::{OptimError, OptimResult};
use crate::linesearch::{LsInitializer, LsStrategy};
use crate::state::Epsilon;

/// 批量求解器参数
///
/// 线搜索的初始化策略、搜索策略以及`c2`留空时使用各求解器的默认值。
///
/// # 使用示例
/// ```ignore
/// let params = BatchParams::default()
///     .with_max_iterations(500)
///     .with_ls_strategy(LsStrategy::CgDescent);
/// let params = BatchParams::from_json(r#"{"max_iterations": 100, "history_size": 8}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    /// 最大迭代次数
    pub max_iterations: usize,
    /// 收敛精度（相对梯度范数）
    pub epsilon: f64,
    pub ls_initializer: Option<LsInitializer>,
    pub ls_strategy: Option<LsStrategy>,
    /// L-BFGS 历史长度
    pub history_size: usize,
    /// 充分下降条件系数
    pub c1: f64,
    /// 曲率条件系数
    pub c2: Option<f64>,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            epsilon: Epsilon::Normal.value(),
            ls_initializer: None,
            ls_strategy: None,
            history_size: 6,
            c1: 1e-4,
            c2: None,
        }
    }
}

impl BatchParams {
    /// 从 JSON 读取参数（缺省字段取默认值），并校验
    pub fn from_json(json: &str) -> OptimResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> OptimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_ls_initializer(mut self, initializer: LsInitializer) -> Self {
        self.ls_initializer = Some(initializer);
        self
    }

    pub fn with_ls_strategy(mut self, strategy: LsStrategy) -> Self {
        self.ls_strategy = Some(strategy);
        self
    }

    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    pub fn with_c1(mut self, c1: f64) -> Self {
        self.c1 = c1;
        self
    }

    pub fn with_c2(mut self, c2: f64) -> Self {
        self.c2 = Some(c2);
        self
    }

    /// 参数校验
    pub fn validate(&self) -> OptimResult<()> {
        if self.max_iterations == 0 {
            return Err(OptimError::InvalidConfig("最大迭代次数必须为正".to_string()));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(OptimError::InvalidConfig(format!(
                "收敛精度必须为正的有限值，实际为{}",
                self.epsilon
            )));
        }
        if self.history_size == 0 {
            return Err(OptimError::InvalidConfig("L-BFGS历史长度必须为正".to_string()));
        }
        let c2 = self.c2.unwrap_or(0.9);
        if !(0.0 < self.c1 && self.c1 < c2 && c2 < 1.0) {
            return Err(OptimError::InvalidConfig(format!(
                "线搜索系数需满足0 < c1 < c2 < 1，实际为c1={}，c2={}",
                self.c1, c2
            )));
        }
        Ok(())
    }
}
