pub mod games;
pub mod meta;
pub mod stats;
pub mod timeline;
