//! Core module containing the main data structures
//!
//! This module contains:
//! - ProcessRecord: one sampled process, plus the line parser and keep policy
//! - SortField: sort engine and cycling policy
//! - filter: free-text filter engine
//! - Settings: user configuration

mod filter;
mod record;
mod settings;
mod sort;

pub use filter::*;
pub use record::*;
pub use settings::*;
pub use sort::*;
