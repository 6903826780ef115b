pub(crate) mod preset;
