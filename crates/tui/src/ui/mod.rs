//! UI rendering module for the TUI application.
//!
//! This module provides the root view, the picker component, the terminal
//! runtime and the theme palettes.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
