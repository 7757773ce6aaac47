//! MusicBrainz API integration
//!
//! Looks up an album by name and turns the best matching release into an
//! [`Album`](crate::model::Album), downloading its front cover from the
//! Cover Art Archive when an artwork folder is configured.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use client::MusicBrainzProvider;
