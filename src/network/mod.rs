//! HTTP networking for outbound museum API calls

mod client;

pub use client::{ApiResponse, HttpClient};
