//! Radio Test Logic
//!
//! Mapping of commands onto test engine configurations, FEM sequencing,
//! and the interfaces to the vendor radio-link transport and test engine.

pub mod engine;
pub mod fem;
pub mod link;
pub mod mapper;
