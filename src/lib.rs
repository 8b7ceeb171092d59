//! # Only Optim
//!
//! `only_optim`项目用纯rust实现一套无约束连续优化引擎：
//! - 批量（确定性）求解器：梯度下降、各类非线性共轭梯度、L-BFGS，配合多种线搜索；
//! - 随机（一阶）求解器：SG、平均SG、Nesterov加速、ADAGRAD、ADADELTA等，配合学习率衰减；
//! - 超参数调优：固定网格搜索与对数尺度的逐步细化搜索（可多线程）。
//!
//! 目标函数只需实现[`Function`]（维度、函数值、函数值+梯度）。
//!
//! # 使用示例
//! ```ignore
//! use only_optim::batch::{self, BatchOptimizer, BatchParams};
//! use only_optim::{Callbacks, ClosureFunction, Vector};
//!
//! let func = ClosureFunction::new(|| 3, |x: &Vector| x.dot(x))
//!     .with_grad(|x: &Vector| (x.dot(x), 2.0 * x));
//! let state = batch::minimize(
//!     &func,
//!     Vector::ones(3),
//!     BatchOptimizer::Lbfgs,
//!     &BatchParams::default(),
//!     &mut Callbacks::new(),
//! )?;
//! ```

pub mod batch;
pub mod bench;
pub mod callbacks;
pub mod errors;
pub mod functions;
pub mod linesearch;
pub mod problem;
pub mod state;
pub mod stoch;
pub mod tune;
pub mod utils;

pub use callbacks::Callbacks;
pub use errors::{OptimError, OptimResult};
pub use problem::{ClosureFunction, Function, Problem, Vector};
pub use state::{Epsilon, State, Status};
