pub(crate) mod tileset;
