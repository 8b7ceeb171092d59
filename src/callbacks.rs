/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 进度/诊断回调三元组：警告日志、错误日志、逐迭代更新回调
 */

use crate::state::State;

type LogOp<'a> = Box<dyn Fn(&str) + 'a>;
type UpdateOp<'a> = Box<dyn FnMut(&State) -> bool + 'a>;

/// 求解器回调
///
/// - `wlog`/`elog`：警告/错误信息，未设置时转发给`log::warn!`/`log::error!`；
/// - `ulog`：每次接受迭代（批量）或每个 epoch 结束（随机）时调用，返回`false`表示请求提前停止。
///
/// 提前停止只在迭代边界检查（不会打断正在进行的线搜索）。
///
/// # 使用示例
/// ```ignore
/// let mut callbacks = Callbacks::new().with_ulog(|state| state.iterations < 10);
/// let state = batch::minimize(&func, x0, BatchOptimizer::Lbfgs, &params, &mut callbacks)?;
/// ```
#[derive(Default)]
pub struct Callbacks<'a> {
    wlog: Option<LogOp<'a>>,
    elog: Option<LogOp<'a>>,
    ulog: Option<UpdateOp<'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wlog<F>(mut self, op: F) -> Self
    where
        F: Fn(&str) + 'a,
    {
        self.wlog = Some(Box::new(op));
        self
    }

    pub fn with_elog<F>(mut self, op: F) -> Self
    where
        F: Fn(&str) + 'a,
    {
        self.elog = Some(Box::new(op));
        self
    }

    pub fn with_ulog<F>(mut self, op: F) -> Self
    where
        F: FnMut(&State) -> bool + 'a,
    {
        self.ulog = Some(Box::new(op));
        self
    }

    /// 报告警告
    pub fn warn(&self, message: &str) {
        match &self.wlog {
            Some(op) => op(message),
            None => log::warn!("{message}"),
        }
    }

    /// 报告错误
    pub fn error(&self, message: &str) {
        match &self.elog {
            Some(op) => op(message),
            None => log::error!("{message}"),
        }
    }

    /// 通知当前状态，返回是否继续
    pub fn update(&mut self, state: &State) -> bool {
        match &mut self.ulog {
            Some(op) => op(state),
            None => true,
        }
    }
}
