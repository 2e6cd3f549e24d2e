//! Gateway authentication: identity middleware and the identify endpoint.
pub mod identify;
pub mod middleware;
