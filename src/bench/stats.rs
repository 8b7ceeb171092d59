use num_traits::Float;

/// 标量统计：个数、均值、方差（总体）、最小值、最大值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats<T> {
    count: usize,
    sum: T,
    sum_sq: T,
    min: T,
    max: T,
}

impl<T: Float> Default for Stats<T> {
    fn default() -> Self {
        Self {
            count: 0,
            sum: T::zero(),
            sum_sq: T::zero(),
            min: T::infinity(),
            max: T::neg_infinity(),
        }
    }
}

impl<T: Float> Stats<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: T) {
        self.count += 1;
        self.sum = self.sum + value;
        self.sum_sq = self.sum_sq + value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// 合并另一组统计
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.sum = self.sum + other.sum;
        self.sum_sq = self.sum_sq + other.sum_sq;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn sum(&self) -> T {
        self.sum
    }

    /// 均值（没有样本时为 NaN）
    pub fn avg(&self) -> T {
        match T::from(self.count) {
            Some(n) if self.count > 0 => self.sum / n,
            _ => T::nan(),
        }
    }

    /// 总体方差（没有样本时为 NaN）
    pub fn var(&self) -> T {
        match T::from(self.count) {
            Some(n) if self.count > 0 => {
                let avg = self.sum / n;
                (self.sum_sq / n - avg * avg).max(T::zero())
            }
            _ => T::nan(),
        }
    }

    pub fn stdev(&self) -> T {
        self.var().sqrt()
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: Float> FromIterator<T> for Stats<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stats = Self::new();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}
