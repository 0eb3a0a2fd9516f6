pub(crate) mod color;
pub(crate) mod gradient;
pub(crate) mod palette;
pub(crate) mod shading;
