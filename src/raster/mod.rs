pub(crate) mod composite;
pub(crate) mod image;
pub(crate) mod painter;
pub(crate) mod surface;
