/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 线搜索测试：插值公式、初始步长、各策略在随机凸二次函数上的接受条件
 */

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::interpolate::{bisection, cubic, quadratic};
use super::*;
use crate::problem::{ClosureFunction, Vector};

/// f(x) = 0.5·xᵗAx + bᵗx，A = MᵗM + I 为正定矩阵
fn random_convex_quadratic(rng: &mut StdRng, dims: usize) -> ClosureFunction<'static> {
    let m = Array2::from_shape_fn((dims, dims), |_| rng.gen_range(-1.0..1.0));
    let a = m.t().dot(&m) + Array2::<f64>::eye(dims);
    let b = Vector::from_shape_fn(dims, |_| rng.gen_range(-1.0..1.0));

    let (a1, b1) = (a.clone(), b.clone());
    ClosureFunction::new(move || dims, move |x: &Vector| 0.5 * x.dot(&a1.dot(x)) + b1.dot(x))
        .with_grad(move |x: &Vector| {
            let ax = a.dot(x);
            (0.5 * x.dot(&ax) + b.dot(x), ax + &b)
        })
}

/// 沿最速下降方向的初始状态
fn steepest_state(problem: &Problem, x0: Vector) -> State {
    let mut state = State::new(problem, x0);
    state.d = -&state.g;
    state
}

#[test]
fn test_interpolants_on_polynomials() {
    // φ(t) = (1.4t - 0.7)²，极小点 t = 0.5
    let parabola = ClosureFunction::new(|| 1, |x: &Vector| (x[0] - 0.7) * (x[0] - 0.7))
        .with_grad(|x: &Vector| ((x[0] - 0.7) * (x[0] - 0.7), 2.0 * (x - 0.7)));
    let problem = Problem::new(&parabola);
    let state = steepest_state(&problem, Vector::zeros(1));

    let lo = LsStep::new(&problem, &state);
    let hi = lo.at(1.0).unwrap();
    assert_abs_diff_eq!(quadratic(&lo, &hi), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(cubic(&lo, &hi), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(bisection(&lo, &hi), 0.5);

    // φ(t) = t³ - 3t + 1，极小点 t = 1（端点次序无关）
    let cubic_fn = ClosureFunction::new(|| 1, |x: &Vector| x[0].powi(3) - 3.0 * x[0] + 1.0)
        .with_grad(|x: &Vector| {
            let v = x[0];
            (v.powi(3) - 3.0 * v + 1.0, Vector::from(vec![3.0 * v * v - 3.0]))
        });
    let problem = Problem::new(&cubic_fn);
    let mut state = State::new(&problem, Vector::zeros(1));
    state.d = Vector::ones(1);

    let step0 = LsStep::new(&problem, &state);
    let far = step0.at(2.0).unwrap();
    assert_abs_diff_eq!(cubic(&step0, &far), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cubic(&far, &step0), 1.0, epsilon = 1e-12);
}

#[test]
fn test_step_conditions() {
    let parabola = ClosureFunction::new(|| 1, |x: &Vector| x[0] * x[0])
        .with_grad(|x: &Vector| (x[0] * x[0], 2.0 * x));
    let problem = Problem::new(&parabola);
    let state = steepest_state(&problem, Vector::ones(1));

    // φ(t) = (1 - 2t)²，φ'(0) = -4
    let step0 = LsStep::new(&problem, &state);
    assert_abs_diff_eq!(step0.phi0(), 1.0);
    assert_abs_diff_eq!(step0.gphi0(), -4.0);

    let exact = step0.at(0.5).unwrap();
    assert!(exact.has_armijo(1e-4) && exact.has_strong_wolfe(0.1));

    let short = step0.at(0.01).unwrap();
    assert!(short.has_armijo(1e-4));
    assert!(!short.has_wolfe(0.9));

    let long = step0.at(1.2).unwrap();
    assert!(!long.has_armijo(1e-4));
    assert!(long.has_wolfe(0.1) && !long.has_strong_wolfe(0.1));

    assert!(step0.at(f64::INFINITY).is_none());
}

#[test]
fn test_initializers() {
    let sphere = crate::functions::Sphere::new(2);
    let problem = Problem::new(&sphere);
    let mut state = steepest_state(&problem, Vector::from(vec![2.0, -1.0]));

    let mut unit = LsInit::new(LsInitializer::Unit);
    assert_abs_diff_eq!(unit.initial(&state), 1.0);

    // 首次迭代：min(1, 1/‖g‖_∞) = 1/4
    let mut quad = LsInit::new(LsInitializer::Quadratic);
    assert_abs_diff_eq!(quad.initial(&state), 0.25);
    let mut consistent = LsInit::new(LsInitializer::Consistent);
    assert_abs_diff_eq!(consistent.initial(&state), 0.25);
    consistent.accepted(0.5);

    // 第二次迭代：f 从 5 下降到 1.25
    let prev_gphi = state.d.dot(&state.g);
    state.x = Vector::from(vec![1.0, -0.5]);
    state.f = 1.25;
    state.g = Vector::from(vec![2.0, -1.0]);
    state.d = -&state.g;
    let gphi = state.d.dot(&state.g);

    let expected = (1.01 * 2.0 * (1.25 - 5.0) / gphi).min(1.0);
    assert_abs_diff_eq!(quad.initial(&state), expected, epsilon = 1e-15);
    assert_abs_diff_eq!(consistent.initial(&state), 0.5 * prev_gphi / gphi, epsilon = 1e-15);
}

#[test]
fn test_every_strategy_satisfies_armijo() {
    let mut rng = StdRng::seed_from_u64(7);
    let c1 = 1e-4;

    for trial in 0..20 {
        let dims = 2 + trial % 5;
        let func = random_convex_quadratic(&mut rng, dims);
        let problem = Problem::new(&func);
        let x0 = Vector::from_shape_fn(dims, |_| rng.gen_range(-3.0..3.0));

        for strategy in LsStrategy::ALL {
            for initializer in LsInitializer::ALL {
                let mut state = steepest_state(&problem, x0.clone());
                let (f0, gphi0) = (state.f, state.d.dot(&state.g));

                let mut linesearch = LineSearch::new(*initializer, *strategy, c1, 0.9);
                assert!(
                    linesearch.update(&problem, &mut state),
                    "{strategy} + {initializer} 在第{trial}个二次函数上失败"
                );
                assert!(state.t > 0.0);
                assert!(state.f <= f0 + c1 * state.t * gphi0, "{strategy}不满足Armijo条件");
                assert_eq!(state.iterations, 1);
            }
        }
    }
}

#[test]
fn test_strong_wolfe_strategies_with_small_c2() {
    let mut rng = StdRng::seed_from_u64(11);
    let c2 = 0.1;

    for _ in 0..10 {
        let func = random_convex_quadratic(&mut rng, 4);
        let problem = Problem::new(&func);
        let x0 = Vector::from_shape_fn(4, |_| rng.gen_range(-3.0..3.0));

        for strategy in [LsStrategy::Interpolation, LsStrategy::CgDescent] {
            let mut state = steepest_state(&problem, x0.clone());
            let d = state.d.clone();
            let gphi0 = d.dot(&state.g);

            let mut linesearch = LineSearch::new(LsInitializer::Unit, strategy, 1e-4, c2);
            assert!(linesearch.update(&problem, &mut state));

            let gphi = d.dot(&state.g);
            assert!(gphi >= c2 * gphi0 - 1e-12, "{strategy}不满足曲率条件");
            if strategy == LsStrategy::Interpolation {
                assert!(gphi <= -c2 * gphi0 + 1e-12, "{strategy}不满足强Wolfe条件");
            }
        }
    }
}

#[test]
fn test_rejects_ascent_direction() {
    let sphere = crate::functions::Sphere::new(3);
    let problem = Problem::new(&sphere);
    let mut state = State::new(&problem, Vector::ones(3));
    state.d = state.g.clone();

    let mut linesearch = LineSearch::new(LsInitializer::Unit, LsStrategy::BacktrackArmijo, 1e-4, 0.9);
    assert!(!linesearch.update(&problem, &mut state));
    assert_eq!(state.x, Vector::ones(3));
    assert_eq!(state.iterations, 0);
}

#[test]
fn test_backtrack_recovers_from_non_finite_values() {
    // 在 x > 1 处函数值为无穷大
    let func = ClosureFunction::new(
        || 1,
        |x: &Vector| if x[0] > 1.0 { f64::INFINITY } else { (x[0] - 0.5).powi(2) },
    )
    .with_grad(|x: &Vector| {
        let v = x[0];
        if v > 1.0 {
            (f64::INFINITY, Vector::from(vec![f64::INFINITY]))
        } else {
            ((v - 0.5).powi(2), Vector::from(vec![2.0 * (v - 0.5)]))
        }
    });
    let problem = Problem::new(&func);
    let mut state = State::new(&problem, Vector::from(vec![-2.0]));
    state.d = Vector::from(vec![10.0]);

    // t = 1 与 t = 0.5 都落在无穷区域，t = 0.25 时回到 x = 0.5
    let mut linesearch = LineSearch::new(LsInitializer::Unit, LsStrategy::BacktrackArmijo, 1e-4, 0.9);
    assert!(linesearch.update(&problem, &mut state));
    assert_abs_diff_eq!(state.t, 0.25);
    assert_abs_diff_eq!(state.f, 0.0);
}
