// ABOUTME: Multi-tenant session isolation for municipal deployments
// ABOUTME: Produces namespaced session descriptors with permission and data-access scoping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Multi-Tenant Isolation
//!
//! Every municipality is a tenant. A tenant session carries:
//! - a namespace derived from tenant and user identifiers
//! - a permission grant set with one tenant-scoped entry
//! - a data-access scope with a tenant-bound row-level-security predicate
//!
//! The row-level-security predicate is the sole cross-tenant guarantee this
//! module provides: it references exactly the owning tenant. It is a
//! constructed string handed to the data layer, not a policy enforced here.

/// Session descriptor construction
pub mod isolation;

pub use isolation::TenantIsolationManager;
