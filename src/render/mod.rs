pub(crate) mod cpu;
pub(crate) mod curve;
pub(crate) mod frame;
pub(crate) mod surface;
pub(crate) mod text;
