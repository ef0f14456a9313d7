//! Capture-Demo: a timed camera mode demo over a GStreamer capture pipeline
//!
//! This library drives an OMX camera pipeline through preview, image capture
//! and shutdown. The sequence logic is written against the `CaptureBackend`
//! trait so it can run on GStreamer or on a mock backend in tests.

pub mod config;
pub mod demo;
pub mod driver;
pub mod pipeline;
pub mod registry;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use config::DemoConfig;
pub use driver::{DemoDriver, Phase};
pub use pipeline::GstCapturePipeline;
pub use registry::{ElementRegistry, ElementRole};
pub use traits::{
    BusMessage, CameraMode, CaptureBackend, DriverError, ElementState, Result, StateChange,
};
