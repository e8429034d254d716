pub(crate) mod traits;

pub(crate) mod context;
pub(crate) mod destination;
pub(crate) mod environment;
