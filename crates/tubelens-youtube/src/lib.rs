//! Data-fetch collaborator for the YouTube Data API v3.
//!
//! Resolves a channel handle, walks its uploads playlist and fetches per-video
//! details, handing the engine a [`tubelens_core::ChannelSnapshot`] through the
//! [`tubelens_core::ChannelSource`] trait.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChannelInfo, YoutubeClient};
pub use error::YoutubeError;
