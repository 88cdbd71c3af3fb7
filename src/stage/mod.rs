pub(crate) mod backdrop;
pub(crate) mod config;
pub(crate) mod layer;
pub(crate) mod sections;
pub(crate) mod signals;
