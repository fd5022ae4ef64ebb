//! Shelfwright Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Shelfwright
//! layout engine and its front ends. It includes:
//!
//! - **Geometry**: Basic geometric types and column geometry ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Inserts**: Declarative insert descriptors ([`insert`] module)
//! - **Catalog**: The ordered, validated registry of insert types ([`catalog::Catalog`])

pub mod catalog;
pub mod color;
pub mod error;
pub mod geometry;
pub mod insert;
