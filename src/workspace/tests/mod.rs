//! Unit tests for the workspace module.
//!
//! Tests are organised by component: domain values, the in-memory hierarchy
//! adapter, ownership checks, position allocation, and the two services.
