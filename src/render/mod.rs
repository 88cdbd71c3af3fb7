pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod recording;
pub(crate) mod statics;
pub(crate) mod surface;
