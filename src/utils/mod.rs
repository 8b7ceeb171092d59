//! # 常用接口模块
//!
//! 本模块提供一些常用的宏：枚举名称表、单元测试断言

#[cfg(test)]
mod tests;

pub mod enum_names;
