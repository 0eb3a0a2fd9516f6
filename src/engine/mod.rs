pub(crate) mod chrome;
pub(crate) mod config;
pub(crate) mod shapes;
pub(crate) mod widgets;
