pub(crate) mod position;
pub(crate) mod smoothing;
pub(crate) mod tracker;
pub(crate) mod window;
