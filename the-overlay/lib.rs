use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod config;
pub mod mutable_string;
pub mod overlay;
pub mod range;

pub type Tendril = SmartString<LazyCompact>;
