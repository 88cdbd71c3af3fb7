pub(crate) mod intersection;
pub(crate) mod visibility;
