pub(crate) mod motion;
pub(crate) mod point;
pub(crate) mod state;
