//! iTunes Store integration
//!
//! Album search and track listing through Apple's public Search API.

pub mod dto;
mod adapter;
mod client;

pub use client::ItunesProvider;
