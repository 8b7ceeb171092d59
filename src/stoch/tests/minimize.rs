/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 随机求解流程测试
 */

use std::cell::RefCell;

use super::{NoisySphere, random_x0};
use crate::assert_err;
use crate::callbacks::Callbacks;
use crate::errors::OptimError;
use crate::functions::Sphere;
use crate::problem::{Function, Vector};
use crate::state::Status;
use crate::stoch::{self, StochOptimizer, StochParams, TUNE_ALPHA0S, TUNE_DECAYS};

fn noisy_params() -> StochParams {
    StochParams::default()
        .with_epochs(20)
        .with_epoch_size(50)
        .with_alpha0(0.1)
        .with_decay(0.1)
}

/// 梯度带噪声时每个求解器都必须明显降低函数值
macro_rules! noisy_sphere_tests {
    ($($variant:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[test]
                fn [<test_noisy_sphere_ $variant:snake>]() {
                    let params = noisy_params();
                    for seed in 0..5 {
                        let function = NoisySphere::new(4, 0.1, 100 + seed);
                        let x0 = random_x0(seed, 4);
                        let f0 = function.value(&x0);

                        let state = stoch::minimize(
                            &function,
                            x0,
                            StochOptimizer::$variant,
                            &params,
                            &mut Callbacks::new(),
                        )
                        .unwrap();

                        assert!(
                            state.f < 1e-2 * f0.max(0.5),
                            "{}: f0={f0:e}，f={:e}",
                            StochOptimizer::$variant,
                            state.f
                        );
                        assert_eq!(state.status, Status::MaxIterations);
                        assert_eq!(state.iterations, 1000);
                        // 初始点 + 每步一次 + 每个 epoch 结束时一次
                        assert_eq!((state.fcalls, state.gcalls), (1021, 1021));
                    }
                }
            )+
        }
    };
}

noisy_sphere_tests!(Sg, Sga, Sia, Ag, Aggr, Adagrad, Adadelta);

#[test]
fn test_converges_without_noise() {
    let sphere = Sphere::new(3);
    // 每步 x ← x/2
    let params = StochParams::default()
        .with_epoch_size(50)
        .with_alpha0(0.25)
        .with_decay(0.0);

    let state = stoch::minimize(
        &sphere,
        random_x0(7, 3),
        StochOptimizer::Sg,
        &params,
        &mut Callbacks::new(),
    )
    .unwrap();
    assert_eq!(state.status, Status::Converged);
    assert_eq!(state.iterations, 50);
    assert!(state.f < 1e-20);
    assert_eq!(state.fcalls, 52);
}

#[test]
fn test_callback_stops_at_epoch_boundary() {
    let function = NoisySphere::new(4, 0.1, 1);
    let params = noisy_params();
    let epochs = RefCell::new(0);
    let mut callbacks = Callbacks::new().with_ulog(|state| {
        *epochs.borrow_mut() += 1;
        state.iterations < 2 * 50
    });

    let state = stoch::minimize(&function, random_x0(1, 4), StochOptimizer::Ag, &params, &mut callbacks)
        .unwrap();
    drop(callbacks);

    assert_eq!(state.status, Status::Converged);
    assert_eq!(state.iterations, 100);
    assert_eq!(epochs.into_inner(), 2);
}

#[test]
fn test_divergence_keeps_best_state() {
    let sphere = Sphere::new(2);
    // 每步 x ← -3x，最终溢出
    let params = StochParams::default()
        .with_epochs(3)
        .with_epoch_size(1000)
        .with_alpha0(2.0)
        .with_decay(0.0);
    let warnings = RefCell::new(Vec::new());
    let mut callbacks = Callbacks::new().with_wlog(|message| warnings.borrow_mut().push(message.to_string()));

    let x0 = Vector::from(vec![0.5, -0.5]);
    let state = stoch::minimize(&sphere, x0.clone(), StochOptimizer::Sg, &params, &mut callbacks).unwrap();
    drop(callbacks);

    assert_eq!(state.status, Status::MaxIterations);
    assert_eq!(state.x, x0);
    assert_eq!(state.iterations, 0);
    assert!(state.is_finite());
    let warnings = warnings.into_inner();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("发散"));
}

#[test]
fn test_minimize_errors() {
    let sphere = Sphere::new(3);
    assert_err!(
        stoch::minimize(
            &sphere,
            Vector::zeros(4),
            StochOptimizer::Sg,
            &StochParams::default(),
            &mut Callbacks::new()
        ),
        OptimError::DimensionMismatch(3, 4)
    );
    assert_err!(
        stoch::minimize(
            &sphere,
            Vector::zeros(3),
            StochOptimizer::Sg,
            &StochParams::default().with_epochs(0),
            &mut Callbacks::new()
        ),
        OptimError::InvalidConfig("epoch数必须为正")
    );
}

#[test]
fn test_tune_picks_from_grid() {
    let sphere = Sphere::new(4);
    let x0 = random_x0(3, 4);
    let params = StochParams::default().with_alpha0(0.5).with_decay(0.3);

    // 无噪声时学习率越大、衰减越慢越好
    let (alpha0, decay) = stoch::tune(&sphere, &x0, StochOptimizer::Sg, &params).unwrap();
    assert_eq!((alpha0, decay), (0.1, 0.1));

    // ADAGRAD 只搜索学习率
    let (alpha0, decay) = stoch::tune(&sphere, &x0, StochOptimizer::Adagrad, &params).unwrap();
    assert!(TUNE_ALPHA0S.contains(&alpha0));
    assert!(!TUNE_DECAYS.contains(&decay));
    assert_eq!(decay, 0.3);

    // ADADELTA 没有需要搜索的参数
    let (alpha0, decay) = stoch::tune(&sphere, &x0, StochOptimizer::Adadelta, &params).unwrap();
    assert_eq!((alpha0, decay), (0.5, 0.3));

    assert_err!(
        stoch::tune(&sphere, &Vector::zeros(2), StochOptimizer::Sg, &params),
        OptimError::DimensionMismatch(4, 2)
    );
}

#[test]
fn test_adaptive_methods_match_tuned_sg() {
    let params = noisy_params();
    let x0 = random_x0(11, 4);

    let function = NoisySphere::new(4, 0.1, 11);
    let tuned_sg = stoch::minimize_tuned(
        &function,
        x0.clone(),
        StochOptimizer::Sg,
        &params,
        &mut Callbacks::new(),
    )
    .unwrap();
    assert!(tuned_sg.f < 1e-3, "{:e}", tuned_sg.f);

    // 不做超参数搜索也能达到同一量级
    for optimizer in [StochOptimizer::Adagrad, StochOptimizer::Adadelta] {
        let function = NoisySphere::new(4, 0.1, 11);
        let state = stoch::minimize(&function, x0.clone(), optimizer, &params, &mut Callbacks::new())
            .unwrap();
        assert!(state.f < 1e-3, "{optimizer}: {:e}", state.f);
    }
}
