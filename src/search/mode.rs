use crate::game::View;

/// How a tree answers for its owner during one simulation.
///
/// `Select` walks and grows the tree. `Rollout` starts once the owner has
/// committed to an action this simulation: the cursor stays put and only a
/// scratch view is advanced, so random plays stay legal to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Select,
    Rollout(View),
}

impl Mode {
    pub fn is_rollout(&self) -> bool {
        matches!(self, Self::Rollout(_))
    }
}
