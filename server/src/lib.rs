//! Staff suite server: configuration, HTTP surface and GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod seed;
