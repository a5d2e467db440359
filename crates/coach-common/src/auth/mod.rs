//! Authentication utilities
//!
//! Token issuance and credential storage live in the external auth service;
//! this module only validates bearer tokens and models their claims.

mod jwt;

pub use jwt::{Claims, JwtService, UserRole};
