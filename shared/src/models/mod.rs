//! Domain models for the Kisan Setu weather advisory service

mod weather;

pub use weather::*;
