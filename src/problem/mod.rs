/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 目标函数接口：维度、函数值、函数值+梯度三个回调，外加梯度精度检查
 *
 * 这是优化引擎与调用方之间唯一的契约。
 * `Problem` 包装任意 `Function`，并统计函数值/梯度的调用次数（这些计数属于最终结果的一部分）。
 */

use std::cell::Cell;

use ndarray::Array1;

mod finite_diff;
mod function;


pub use finite_diff::{central_difference, finite_diff_step};
pub use function::{ClosureFunction, Function};

/// 优化引擎使用的稠密向量类型
pub type Vector = Array1<f64>;

/// 带调用计数的优化问题
///
/// 每次调用`value`会令`fcalls`加一；每次调用`value_and_grad`会令`fcalls`和`gcalls`同时加一。
/// 计数器使用`Cell`，因此线搜索等只持有`&Problem`的组件也能计数。
pub struct Problem<'a> {
    function: &'a dyn Function,
    fcalls: Cell<usize>,
    gcalls: Cell<usize>,
}

impl<'a> Problem<'a> {
    pub fn new(function: &'a dyn Function) -> Self {
        Self {
            function,
            fcalls: Cell::new(0),
            gcalls: Cell::new(0),
        }
    }

    /// 重置调用计数
    pub fn clear(&self) {
        self.fcalls.set(0);
        self.gcalls.set(0);
    }

    /// 问题维度
    pub fn size(&self) -> usize {
        self.function.size()
    }

    /// 计算函数值
    pub fn value(&self, x: &Vector) -> f64 {
        self.fcalls.set(self.fcalls.get() + 1);
        self.function.value(x)
    }

    /// 计算函数值和梯度
    pub fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        self.fcalls.set(self.fcalls.get() + 1);
        self.gcalls.set(self.gcalls.get() + 1);
        self.function.value_and_grad(x)
    }

    /// 函数值调用次数
    pub fn fcalls(&self) -> usize {
        self.fcalls.get()
    }

    /// 梯度调用次数
    pub fn gcalls(&self) -> usize {
        self.gcalls.get()
    }

    /// 梯度精度：解析梯度与中心差分梯度之差的无穷范数，再除以`1 + |f|`
    ///
    /// 结果超过精度阈值说明目标函数的梯度实现有误（而不是优化引擎的问题）。
    /// 该检查只用于诊断，不计入调用次数。
    pub fn grad_accuracy(&self, x: &Vector) -> f64 {
        grad_accuracy(self.function, x)
    }
}

/// 见[`Problem::grad_accuracy`]
pub fn grad_accuracy(function: &dyn Function, x: &Vector) -> f64 {
    let (fx, gx) = function.value_and_grad(x);
    let gx_approx = central_difference(|xx| function.value(xx), x);

    let max_delta = gx
        .iter()
        .zip(gx_approx.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    max_delta / (1.0 + fx.abs())
}
