//! Average-face analysis: crop and normalize faces from a batch of images,
//! synthesize their pixel-wise average, and rank every face by how closely
//! its appearance descriptor matches the average's.

pub mod aggregation;
pub mod detection;
pub mod features;
pub mod imaging;
pub mod normalization;
pub mod pipeline;
pub mod reporting;
pub mod scoring;
pub mod shared;
