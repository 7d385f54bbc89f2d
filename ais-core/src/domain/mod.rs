mod ais;
mod port;
mod route;
mod vessel;

pub use ais::*;
pub use port::*;
pub use route::*;
pub use vessel::*;
