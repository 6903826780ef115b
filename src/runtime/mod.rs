pub(crate) mod animation;
pub(crate) mod host;
pub(crate) mod scheduler;
