/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 优化引擎的错误类型
 *
 * 注：求解过程本身的结果（收敛、达到最大迭代次数、线搜索失败）不属于错误，
 * 而是编码在返回状态的 `Status` 中；这里只收录在第一次迭代前就能发现的调用方误用。
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimError {
    // 初始点与目标函数的维度不一致
    #[error("维度不一致：目标函数的维度为{expected}，初始点的维度为{got}")]
    DimensionMismatch { expected: usize, got: usize },

    // 枚举名称解析
    #[error("未知的{kind}名称：`{name}`")]
    UnknownName { kind: &'static str, name: String },

    #[error("参数无效：{0}")]
    InvalidConfig(String),
    #[error("配置解析失败：{0}")]
    ConfigParse(String),
    #[error("线程池创建失败：{0}")]
    ThreadPool(String),
}

impl From<serde_json::Error> for OptimError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

pub type OptimResult<T> = Result<T, OptimError>;
