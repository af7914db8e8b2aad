pub(crate) mod scroll_scene;
pub(crate) mod spec;
