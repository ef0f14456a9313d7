//! Core traits and types for the capture pipeline abstraction.

use std::fmt;

use crate::registry::ElementRole;

/// Operating mode of the camera element.
///
/// Mirrors the camera's `mode` enum property; each variant renders as the
/// GLib enum nick the element accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Viewfinder only.
    Preview,
    /// Video capture.
    Video,
    /// Video capture with still images.
    VideoImage,
    /// Still image capture.
    Image,
    /// High speed still image capture.
    ImageHighSpeed,
}

impl CameraMode {
    /// The enum nick used for the `mode` property.
    #[must_use]
    pub const fn nick(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Video => "video",
            Self::VideoImage => "video-image",
            Self::Image => "image",
            Self::ImageHighSpeed => "image-hs",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nick())
    }
}

/// Element state as reported on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementState {
    /// No pending state.
    VoidPending,
    /// Initial state, all resources released.
    Null,
    /// Resources allocated, not processing.
    Ready,
    /// Prerolled, clock stopped.
    Paused,
    /// Data flowing.
    Playing,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VoidPending => "VOID_PENDING",
            Self::Null => "NULL",
            Self::Ready => "READY",
            Self::Paused => "PAUSED",
            Self::Playing => "PLAYING",
        };
        f.write_str(name)
    }
}

/// Non-failing outcome of a state change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Completed synchronously.
    Success,
    /// Will complete later; completion is reported on the bus.
    Async,
    /// Completed, but a live source cannot preroll in paused.
    NoPreroll,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "SUCCESS",
            Self::Async => "ASYNC",
            Self::NoPreroll => "NO_PREROLL",
        };
        f.write_str(name)
    }
}

/// Framework independent view of a bus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusMessage {
    /// An element reported an error.
    Error {
        /// Path of the posting element.
        source: String,
        /// Error domain, e.g. `gst-resource-error-quark`.
        domain: String,
        /// Numeric code within the domain, if the domain is a GStreamer one.
        code: Option<i32>,
        /// Error message.
        message: String,
        /// Additional debug text, if any.
        debug: Option<String>,
    },
    /// End of stream reached.
    EndOfStream,
    /// An element changed state.
    StateChanged {
        /// Path of the element that changed state.
        source: String,
        /// Whether the element is the top-level pipeline.
        from_pipeline: bool,
        /// Previous state.
        old: ElementState,
        /// New state.
        current: ElementState,
        /// Pending target state.
        pending: ElementState,
    },
    /// Any message the driver does not act on.
    Other,
}

/// Error type for driver and pipeline operations.
#[derive(Debug)]
pub enum DriverError {
    /// The media framework failed to initialize.
    Init(String),
    /// The pipeline description could not be parsed.
    Parse(String),
    /// The parsed description is not a top-level pipeline.
    NotAPipeline,
    /// The pipeline has no message bus.
    NoBus,
    /// A required element role has no matching child.
    MissingElement(ElementRole),
    /// Two children matched the same role.
    DuplicateElement(ElementRole),
    /// The element does not expose the property.
    PropertyNotSupported {
        /// Element name.
        element: String,
        /// Property name.
        property: String,
    },
    /// The element rejected the camera mode.
    InvalidMode {
        /// Element name.
        element: String,
        /// Requested mode.
        mode: CameraMode,
    },
    /// Adding or removing a branch failed.
    Graph(String),
    /// A state change request failed.
    StateChange {
        /// Requested state.
        target: ElementState,
        /// Failure description.
        reason: String,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "Failed to initialize GStreamer: {msg}"),
            Self::Parse(msg) => write!(f, "Failed to parse pipeline: {msg}"),
            Self::NotAPipeline => write!(f, "Description does not produce a pipeline"),
            Self::NoBus => write!(f, "Pipeline has no bus"),
            Self::MissingElement(role) => write!(f, "No {role} element in pipeline"),
            Self::DuplicateElement(role) => write!(f, "More than one {role} element in pipeline"),
            Self::PropertyNotSupported { element, property } => {
                write!(f, "Element {element} has no property '{property}'")
            }
            Self::InvalidMode { element, mode } => {
                write!(f, "Element {element} does not support mode '{mode}'")
            }
            Self::Graph(msg) => write!(f, "Pipeline graph error: {msg}"),
            Self::StateChange { target, reason } => {
                write!(f, "Failed to set state {target}: {reason}")
            }
        }
    }
}

impl std::error::Error for DriverError {}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Abstraction over the capture pipeline the driver controls.
pub trait CaptureBackend {
    /// Set the camera's operating mode.
    fn set_camera_mode(&mut self, mode: CameraMode) -> Result<()>;

    /// Add the image capture branch back into the pipeline.
    fn attach_image_branch(&mut self) -> Result<()>;

    /// Remove the image capture branch from the pipeline.
    fn detach_image_branch(&mut self) -> Result<()>;

    /// Request a state change on the whole pipeline.
    fn set_pipeline_state(&mut self, state: ElementState) -> Result<StateChange>;

    /// Request a state change on the image capture branch alone.
    fn set_image_branch_state(&mut self, state: ElementState) -> Result<StateChange>;
}
