//! Utility functions shared by the readers and the command line

pub mod logging;
