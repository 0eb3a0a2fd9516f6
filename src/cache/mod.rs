pub(crate) mod fingerprint;
pub(crate) mod render_cache;
pub(crate) mod shadow;
