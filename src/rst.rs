//! Main module for rst-parser library functionality
//!
//! Data flows through the modules in this order:
//!
//! raw text -> [`annotation`] -> [`assembling`] -> [`document`] -> [`parsing`] -> [`formats`]
//!
//! [`transforms`] chains these steps into pipelines; [`config`] supplies the
//! runtime settings.

pub mod annotation;
pub mod assembling;
pub mod clusters;
pub mod config;
pub mod document;
pub mod formats;
pub mod parsing;
pub mod token;
pub mod transforms;
