use super::{Vector, central_difference};

/// 目标函数 trait：R^n → R，并可单独计算梯度
///
/// # 约定
/// - 对同一个`x`的结果必须是确定的（求解器假设可重复求值）；
/// - `value_and_grad`返回的梯度维度与`x`相同。
///
/// 引擎不校验这些约定（除了诊断用的梯度精度检查），回调本身的行为会原样传播出去。
pub trait Function {
    /// 维度
    fn size(&self) -> usize;

    /// 函数值
    fn value(&self, x: &Vector) -> f64;

    /// 函数值与梯度
    fn value_and_grad(&self, x: &Vector) -> (f64, Vector);
}

type SizeOp<'a> = Box<dyn Fn() -> usize + 'a>;
type ValueOp<'a> = Box<dyn Fn(&Vector) -> f64 + 'a>;
type GradOp<'a> = Box<dyn Fn(&Vector) -> (f64, Vector) + 'a>;

/// 由闭包拼装的目标函数
///
/// # 使用示例
/// ```ignore
/// let func = ClosureFunction::new(|| 2, |x: &Vector| x.dot(x))
///     .with_grad(|x: &Vector| (x.dot(x), 2.0 * x));
/// ```
///
/// 未提供解析梯度时，`value_and_grad`退化为中心差分近似。
pub struct ClosureFunction<'a> {
    op_size: SizeOp<'a>,
    op_value: ValueOp<'a>,
    op_grad: Option<GradOp<'a>>,
}

impl<'a> ClosureFunction<'a> {
    /// 创建只有函数值的目标函数（梯度通过有限差分估计）
    pub fn new<S, V>(op_size: S, op_value: V) -> Self
    where
        S: Fn() -> usize + 'a,
        V: Fn(&Vector) -> f64 + 'a,
    {
        Self {
            op_size: Box::new(op_size),
            op_value: Box::new(op_value),
            op_grad: None,
        }
    }

    /// 设置解析梯度
    pub fn with_grad<G>(mut self, op_grad: G) -> Self
    where
        G: Fn(&Vector) -> (f64, Vector) + 'a,
    {
        self.op_grad = Some(Box::new(op_grad));
        self
    }

    /// 是否提供了解析梯度
    pub fn has_grad(&self) -> bool {
        self.op_grad.is_some()
    }
}

impl Function for ClosureFunction<'_> {
    fn size(&self) -> usize {
        (self.op_size)()
    }

    fn value(&self, x: &Vector) -> f64 {
        (self.op_value)(x)
    }

    fn value_and_grad(&self, x: &Vector) -> (f64, Vector) {
        match &self.op_grad {
            Some(op_grad) => op_grad(x),
            None => {
                let g = central_difference(|xx| (self.op_value)(xx), x);
                ((self.op_value)(x), g)
            }
        }
    }
}
