//! Palisade - Zero Trust Document Gateway
//!
//! This library provides the core functionality for the Palisade gateway:
//! bearer-token claims extraction and role-based visibility decisions over a
//! fixed resource catalog, plus the HTTP surface around them. It exposes all
//! modules for testing purposes.

pub mod authz;
pub mod claims;
pub mod settings;
pub mod web;
