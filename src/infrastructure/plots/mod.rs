pub mod noop;
pub mod svg;
