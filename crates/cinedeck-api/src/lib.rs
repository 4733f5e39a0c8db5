//! API client library for cinedeck.
//!
//! Provides clients for the TMDB API and the third-party file-search endpoint
//! used to look up download links.

/// File-search endpoint client.
pub mod filesearch;

/// Request pacing shared by the HTTP clients.
mod rate_limiter;

/// TMDB API client.
pub mod tmdb;
