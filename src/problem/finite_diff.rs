use super::Vector;

/// 有限差分步长，见 "Numerical optimization", Nocedal & Wright, 2nd edition, p.197
pub fn finite_diff_step() -> f64 {
    (10.0 * f64::EPSILON).cbrt()
}

/// 中心差分近似梯度：g(i) = (f(x + h·e_i) - f(x - h·e_i)) / 2h
pub fn central_difference<F>(fval: F, x: &Vector) -> Vector
where
    F: Fn(&Vector) -> f64,
{
    let dx = finite_diff_step();

    let mut xp = x.clone();
    let mut xn = x.clone();
    let mut g = Vector::zeros(x.len());
    for i in 0..x.len() {
        xp[i] = x[i] + dx;
        xn[i] = x[i] - dx;

        // 用实际的浮点差值作分母，抵消 x(i) ± dx 的舍入误差
        g[i] = (fval(&xp) - fval(&xn)) / (xp[i] - xn[i]);

        xp[i] = x[i];
        xn[i] = x[i];
    }
    g
}
