//! Helper functions shared by views and commands

pub mod date;
