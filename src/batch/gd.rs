use super::DescentDirection;
use crate::problem::Vector;
use crate::state::State;

/// 最速下降：d = -g
#[derive(Debug, Clone, Default)]
pub struct Gd;

impl DescentDirection for Gd {
    fn direction(&mut self, _prev: Option<&State>, curr: &State) -> Vector {
        -&curr.g
    }
}
