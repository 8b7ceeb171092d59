use std::str::FromStr;

use crate::errors::OptimError;
use crate::linesearch::{LsInitializer, LsStrategy};
use crate::problem::Vector;
use crate::state::{Epsilon, Status};
use crate::{assert_err, assert_vec_abs_diff_eq};

#[test]
fn test_enum_names_roundtrip() {
    for status in Status::ALL {
        assert_eq!(Status::from_str(status.name()).unwrap(), *status);
        assert_eq!(status.to_string(), status.name());
    }
    for init in LsInitializer::ALL {
        assert_eq!(init.name().parse::<LsInitializer>().unwrap(), *init);
    }
    assert_eq!(LsStrategy::ALL.len(), 5);
}

#[test]
fn test_enum_names_case_insensitive() {
    assert_eq!(
        "Backtrack-Strong-Wolfe".parse::<LsStrategy>().unwrap(),
        LsStrategy::BacktrackStrongWolfe
    );
    assert_eq!(" LOOSE ".parse::<Epsilon>().unwrap(), Epsilon::Loose);
}

#[test]
fn test_enum_names_unknown() {
    let result = "newton".parse::<LsStrategy>();
    assert_err!(result, OptimError::UnknownName("线搜索策略", "newton"));
    assert_err!(
        "".parse::<Status>(),
        OptimError::UnknownName { name, .. } if name.is_empty()
    );
}

#[test]
fn test_assert_vec_abs_diff_eq_macro() {
    let a = Vector::from(vec![1.0, 2.0]);
    let b = Vector::from(vec![1.0 + 1e-9, 2.0 - 1e-9]);
    assert_vec_abs_diff_eq!(a, b, epsilon = 1e-8);
}

#[test]
#[should_panic(expected = "第1个元素不相等")]
fn test_assert_vec_abs_diff_eq_macro_fails() {
    let a = Vector::from(vec![1.0, 2.0]);
    let b = Vector::from(vec![1.0, 2.5]);
    assert_vec_abs_diff_eq!(a, b, epsilon = 1e-8);
}
