pub(crate) mod kind;
pub(crate) mod particle;
pub(crate) mod pool;
pub(crate) mod trail;
