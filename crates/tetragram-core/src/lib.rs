//! Tetragram Core Types and Definitions
//!
//! This crate provides the foundational types for the tetragram diagram
//! language. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Spans**: Source position tracking ([`span::Span`], [`span::Spanned`])
//! - **Document tree**: The id-indexed diagram document model ([`ast`] module)
//!
//! The tree is produced once per pass by an upstream parser/linker and is
//! read-only for every downstream consumer; see the [`ast`] module docs for
//! the containment and reference rules.

pub mod ast;
pub mod identifier;
pub mod span;

pub use ast::{Document, NodeData, NodeId, NodeKind, Reference, TreeError};
pub use identifier::Id;
pub use span::{Span, Spanned};
