//! # remapper Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the remapper library. Import this module to get quick access to the essential
//! types for rename-table lookups and symbol resolution.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all remapper operations
pub use crate::Error;

/// The result type used throughout remapper
pub use crate::Result;

/// Configuration for table loading and target resolution
pub use crate::ResolverOptions;

// ================================================================================================
// Rename Tables
// ================================================================================================

/// Rename tables and their records
pub use crate::mapping::{MemberKey, RenameRecord, RenameRecordRc, RenameTable};

// ================================================================================================
// Descriptors
// ================================================================================================

/// Descriptor shapes and helpers
pub use crate::descriptor::{
    encode_method, encode_type, is_partial, param_list, parse_method_descriptor,
    parse_type_descriptor, remap, MethodShape, PrimitiveKind, TypeShape,
};

// ================================================================================================
// Symbol Resolution
// ================================================================================================

/// Host facts, queries and the resolver
pub use crate::resolver::{
    ClassInfo, ClassInfoRc, DeclaredMember, DeclaredMemberRc, MatchOutcome, MemberKind,
    Modifiers, Query, SymbolResolver,
};

/// Override-chain walking
pub use crate::hierarchy::{
    ClassPool, ClassSource, HierarchyWalker, OverridePredicate, SignatureOverrides,
};

/// Patch-target resolution
pub use crate::target::{ClassTarget, FieldTarget, MethodTarget, TargetResolver};
