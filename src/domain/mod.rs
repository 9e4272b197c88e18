mod input;
mod money;
mod operation;
mod sample;
mod summary;

pub use input::*;
pub use money::*;
pub use operation::*;
pub use sample::*;
pub use summary::*;
