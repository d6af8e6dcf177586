mod build;
mod hash;
mod inspect;

pub use build::cmd_build;
pub use hash::cmd_hash;
pub use inspect::cmd_inspect;
