/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : L-BFGS 的有界历史：定长环形缓冲区
 *
 * 槽位在创建时一次性预留，写满后新数据原地覆盖最旧的槽位，不再重新分配。
 */

use crate::problem::Vector;

/// 一对修正量：s = Δx, y = Δg，以及 rho = 1 / (sᵗy)
#[derive(Debug, Clone)]
pub struct CurvaturePair {
    pub s: Vector,
    pub y: Vector,
    pub rho: f64,
}

/// 最多保存`capacity`对修正量，超出时淘汰最旧的一对
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    slots: Vec<CurvaturePair>,
    /// 写满后最旧数据所在的槽位
    start: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            start: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.start = 0;
    }

    /// 加入一对修正量；曲率 sᵗy 不为正（或非有限）时丢弃并返回`false`
    pub fn push(&mut self, s: Vector, y: Vector) -> bool {
        let sy = s.dot(&y);
        if !(sy.is_finite() && sy > 0.0) {
            return false;
        }

        let pair = CurvaturePair { s, y, rho: 1.0 / sy };
        if self.slots.len() < self.capacity {
            self.slots.push(pair);
        } else {
            self.slots[self.start] = pair;
            self.start = (self.start + 1) % self.capacity;
        }
        true
    }

    /// 按从旧到新的顺序遍历
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CurvaturePair> + ExactSizeIterator {
        let len = self.slots.len();
        (0..len).map(move |i| &self.slots[(self.start + i) % len])
    }

    pub fn oldest(&self) -> Option<&CurvaturePair> {
        self.iter().next()
    }

    pub fn newest(&self) -> Option<&CurvaturePair> {
        self.iter().next_back()
    }
}
