//! HTTP surface for the flavor bridge services.

pub mod gateway;
