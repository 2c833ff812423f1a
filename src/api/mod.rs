//! Client for the society REST API
//!
//! [`SocietyApi`] is the seam the views talk through; [`HttpApi`] is the
//! `reqwest` implementation used in practice.

pub mod client;
pub mod dto;
pub mod error;
pub mod http;

pub use client::SocietyApi;
pub use http::HttpApi;
