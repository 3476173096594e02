//! HTTP surface of the image-generation backend

pub mod endpoints;
