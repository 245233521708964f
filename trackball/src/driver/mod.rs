//! Hardware drivers

pub mod gpio;
