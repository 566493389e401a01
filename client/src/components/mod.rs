//! Reusable UI components shared across pages.

pub mod gate;
pub mod nav_bar;
