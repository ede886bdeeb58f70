pub mod honeycomb;

pub use honeycomb::HoneycombSink;
