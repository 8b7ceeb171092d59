use approx::assert_abs_diff_eq;

use crate::batch::{DescentDirection, History, Lbfgs};
use crate::functions::Sphere;
use crate::problem::{Problem, Vector};
use crate::state::State;

fn pair(k: usize) -> (Vector, Vector) {
    let s = Vector::from(vec![k as f64, 1.0]);
    let y = Vector::from(vec![1.0, k as f64]);
    (s, y)
}

#[test]
fn test_history_push_and_evict() {
    let m = 3;
    let mut history = History::new(m);
    assert!(history.is_empty());
    assert_eq!(history.capacity(), m);

    for k in 1..=10 {
        let (s, y) = pair(k);
        assert!(history.push(s, y));
        assert!(history.len() <= m);

        // 最旧的一对对应第 max(1, k - m + 1) 次迭代
        let oldest = history.oldest().unwrap();
        assert_abs_diff_eq!(oldest.s[0], k.saturating_sub(m - 1).max(1) as f64);
        assert_abs_diff_eq!(history.newest().unwrap().s[0], k as f64);
    }

    assert_eq!(history.len(), m);
    let order: Vec<f64> = history.iter().map(|p| p.s[0]).collect();
    assert_eq!(order, vec![8.0, 9.0, 10.0]);
    let reversed: Vec<f64> = history.iter().rev().map(|p| p.s[0]).collect();
    assert_eq!(reversed, vec![10.0, 9.0, 8.0]);

    history.clear();
    assert!(history.is_empty());
    assert!(history.oldest().is_none());
}

#[test]
fn test_history_rejects_non_positive_curvature() {
    let mut history = History::new(2);
    assert!(!history.push(Vector::from(vec![1.0, 0.0]), Vector::from(vec![-1.0, 0.0])));
    assert!(!history.push(Vector::from(vec![1.0, 0.0]), Vector::from(vec![0.0, 1.0])));
    assert!(history.is_empty());

    assert!(history.push(Vector::from(vec![2.0, 0.0]), Vector::from(vec![4.0, 0.0])));
    assert_abs_diff_eq!(history.newest().unwrap().rho, 1.0 / 8.0);
}

#[test]
fn test_lbfgs_history_bounded_during_iterations() {
    let sphere = Sphere::new(2);
    let problem = Problem::new(&sphere);
    let mut lbfgs = Lbfgs::new(4);

    let mut prev: Option<State> = None;
    for k in 0..12 {
        let x = Vector::from(vec![1.0 + k as f64, 2.0 * k as f64 - 3.0]);
        let mut state = State::new(&problem, x);
        state.iterations = k;

        let d = lbfgs.direction(prev.as_ref(), &state);
        state.d = d;
        assert!(lbfgs.history().len() <= 4);
        assert_eq!(lbfgs.history().len(), k.min(4));
        prev = Some(state);
    }

    // 最旧的一对对应第 k - m + 1 次更新：s = x_8 - x_7
    let oldest = lbfgs.history().oldest().unwrap();
    assert_abs_diff_eq!(oldest.s[0], 1.0);
    assert_abs_diff_eq!(oldest.s[1], 2.0);
}

#[test]
fn test_lbfgs_direction_on_sphere() {
    let sphere = Sphere::new(3);
    let problem = Problem::new(&sphere);
    let mut lbfgs = Lbfgs::new(6);

    // 历史为空时退化为最速下降
    let mut first = State::new(&problem, Vector::from(vec![1.0, -2.0, 0.5]));
    let d = lbfgs.direction(None, &first);
    assert_eq!(d, -&first.g);
    first.d = d;

    // 球函数的 Hessian 为 2I，一对修正量即可得到牛顿方向 -x
    let second = State::new(&problem, Vector::from(vec![0.5, -1.0, 0.25]));
    let d = lbfgs.direction(Some(&first), &second);
    for (di, xi) in d.iter().zip(second.x.iter()) {
        assert_abs_diff_eq!(*di, -xi, epsilon = 1e-12);
    }
}
