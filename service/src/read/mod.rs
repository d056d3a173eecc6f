//! Read entities definitions.

pub mod partner;
