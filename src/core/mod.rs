//! Shared numeric primitives without blend semantics (Hz, sec, [0,1] scalars).

pub mod frame;
pub mod ticker;
pub mod util;
