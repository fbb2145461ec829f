//! Shared utilities for the DealGrid workspace.

pub mod version_info;
