use approx::assert_abs_diff_eq;

use crate::assert_err;
use crate::batch::{BatchOptimizer, BatchParams};
use crate::bench::{self, BenchConfig, BenchStats, Stats};
use crate::errors::OptimError;
use crate::functions::{RotatedEllipsoid, Sphere, SumSquares, TestFunction};
use crate::problem::{Problem, Vector};
use crate::state::{State, Status};

#[test]
fn test_stats() {
    let stats: Stats<f64> = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
    assert_eq!(stats.count(), 4);
    assert_abs_diff_eq!(stats.sum(), 10.0);
    assert_abs_diff_eq!(stats.avg(), 2.5);
    assert_abs_diff_eq!(stats.var(), 1.25, epsilon = 1e-12);
    assert_abs_diff_eq!(stats.stdev(), 1.25f64.sqrt(), epsilon = 1e-12);
    assert_eq!((stats.min(), stats.max()), (1.0, 4.0));

    let empty = Stats::<f32>::new();
    assert!(empty.is_empty());
    assert!(empty.avg().is_nan() && empty.var().is_nan());
}

#[test]
fn test_stats_merge() {
    let mut left: Stats<f32> = [1.0, 5.0].into_iter().collect();
    let right: Stats<f32> = [3.0].into_iter().collect();
    left.merge(&right);
    assert_eq!(left.count(), 3);
    assert_abs_diff_eq!(left.avg(), 3.0);
    assert_eq!((left.min(), left.max()), (1.0, 5.0));

    // 合并空统计不改变结果
    left.merge(&Stats::new());
    assert_eq!(left.count(), 3);
    assert_eq!((left.min(), left.max()), (1.0, 5.0));
}

#[test]
fn test_bench_stats_push_and_merge() {
    let sphere = Sphere::new(2);
    let problem = Problem::new(&sphere);
    let mut converged = State::new(&problem, Vector::zeros(2));
    converged.status = Status::Converged;
    let mut running = State::new(&problem, Vector::ones(2));
    running.iterations = 4;

    let mut left = BenchStats::default();
    left.push(&converged);
    let mut right = BenchStats::default();
    right.push(&running);
    right.push(&running);

    left.merge(&right);
    assert_eq!(left.criterion.count(), 3);
    assert_eq!(left.failures, 2);
    assert_eq!((left.iterations.min(), left.iterations.max()), (0.0, 4.0));
    assert_abs_diff_eq!(left.criterion.min(), 0.0);
    assert_abs_diff_eq!(left.criterion.max(), running.convergence_criteria());
}

fn convex_functions() -> Vec<Box<dyn TestFunction>> {
    vec![
        Box::new(Sphere::new(3)),
        Box::new(SumSquares::new(4)),
        Box::new(RotatedEllipsoid::new(2)),
    ]
}

#[test]
fn test_bench_run() {
    let functions = convex_functions();
    let optimizers = [BatchOptimizer::Gd, BatchOptimizer::CgdN, BatchOptimizer::Lbfgs];
    let config = BenchConfig {
        trials: 6,
        threads: 3,
        ..BenchConfig::default()
    };

    let report = bench::run(&functions, &optimizers, &config).unwrap();
    assert_eq!(report.len(), functions.len() * optimizers.len());

    for ((name, optimizer), stats) in &report {
        assert_eq!(stats.criterion.count(), 6, "{name} {optimizer}");
        assert_eq!(stats.failures, 0, "{name} {optimizer}");
        assert!(stats.criterion.max() < config.params.epsilon);
        assert!(stats.fcalls.min() >= 1.0);
        assert_eq!(stats.fcalls.sum(), stats.gcalls.sum());
    }
    assert!(report.contains_key(&("Sphere[3D]".to_string(), BatchOptimizer::Lbfgs)));
}

#[test]
fn test_bench_is_reproducible() {
    let functions = convex_functions();
    let optimizers = [BatchOptimizer::CgdPrp];
    let single = BenchConfig {
        trials: 4,
        threads: 1,
        seed: 42,
        ..BenchConfig::default()
    };
    let multi = BenchConfig {
        threads: 4,
        ..single.clone()
    };

    let a = bench::run(&functions, &optimizers, &single).unwrap();
    let b = bench::run(&functions, &optimizers, &multi).unwrap();
    for (key, stats) in &a {
        let other = &b[key];
        // 累加顺序随线程调度变化，只比较与顺序无关的量
        assert_eq!(stats.iterations.min(), other.iterations.min());
        assert_eq!(stats.iterations.max(), other.iterations.max());
        assert_eq!(stats.fcalls.sum(), other.fcalls.sum());
        assert_eq!(stats.criterion.max(), other.criterion.max());
    }
}

#[test]
fn test_random_start() {
    let a = bench::random_start(7, 3, 5);
    assert_eq!(a.len(), 5);
    assert!(a.iter().all(|v| (-1.0..1.0).contains(v)));
    assert_eq!(a, bench::random_start(7, 3, 5));
    assert_ne!(a, bench::random_start(7, 4, 5));
}

#[test]
fn test_bench_errors() {
    let functions = convex_functions();
    let config = BenchConfig {
        trials: 0,
        ..BenchConfig::default()
    };
    assert_err!(
        bench::run(&functions, &[BatchOptimizer::Gd], &config),
        OptimError::InvalidConfig("随机起点个数必须为正")
    );

    let config = BenchConfig {
        threads: 0,
        ..BenchConfig::default()
    };
    assert_err!(bench::run(&functions, &[BatchOptimizer::Gd], &config));

    // c1 与 CG 默认的 c2 冲突：错误在任务中产生并被带回
    let config = BenchConfig {
        trials: 2,
        params: BatchParams::default().with_c1(0.5),
        ..BenchConfig::default()
    };
    assert_err!(
        bench::run(&functions, &[BatchOptimizer::Lbfgs, BatchOptimizer::CgdFr], &config),
        OptimError::InvalidConfig(msg) if msg.contains("cgd-fr")
    );
}
