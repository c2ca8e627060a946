pub mod composer;
pub mod header;

pub use composer::Composer;
pub use header::Header;
