pub mod lockfile;
pub mod operation;
pub mod version;

pub use lockfile::{ComposerLock, diff_locks};
pub use operation::{PackageVersion, UpdateOperation};
