mod inconsistency;
mod trail;

pub use inconsistency::*;
pub(crate) use trail::*;
