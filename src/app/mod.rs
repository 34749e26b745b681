//! App - Application Shell

pub mod application;
