mod fastx;
mod input;

pub use fastx::{FastxFormat, FastxReader};
