//! GStreamer implementation of the capture backend.

use gstreamer as gst;
use gstreamer::glib;
use gstreamer::glib::translate::IntoGlib;
use gstreamer::prelude::*;
use tracing::debug;

use crate::registry::ElementRegistry;
use crate::traits::{
    BusMessage, CameraMode, CaptureBackend, DriverError, ElementState, Result, StateChange,
};

/// Property selecting the camera's operating mode.
const MODE_PROPERTY: &str = "mode";

impl From<gst::State> for ElementState {
    fn from(state: gst::State) -> Self {
        match state {
            gst::State::Null => Self::Null,
            gst::State::Ready => Self::Ready,
            gst::State::Paused => Self::Paused,
            gst::State::Playing => Self::Playing,
            _ => Self::VoidPending,
        }
    }
}

impl From<ElementState> for gst::State {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::VoidPending => Self::VoidPending,
            ElementState::Null => Self::Null,
            ElementState::Ready => Self::Ready,
            ElementState::Paused => Self::Paused,
            ElementState::Playing => Self::Playing,
        }
    }
}

impl From<gst::StateChangeSuccess> for StateChange {
    fn from(success: gst::StateChangeSuccess) -> Self {
        match success {
            gst::StateChangeSuccess::Async => Self::Async,
            gst::StateChangeSuccess::NoPreroll => Self::NoPreroll,
            _ => Self::Success,
        }
    }
}

/// A parsed capture pipeline with its camera and capture branches resolved.
pub struct GstCapturePipeline {
    pipeline: gst::Pipeline,
    camera: gst::Element,
    image_branch: gst::Element,
    video_branch: Option<gst::Element>,
}

impl GstCapturePipeline {
    /// Parse a `gst-launch` description and resolve its elements.
    ///
    /// GStreamer must already be initialized.
    pub fn launch(description: &str) -> Result<Self> {
        let pipeline = gst::parse::launch(description)
            .map_err(|err| DriverError::Parse(err.to_string()))?
            .downcast::<gst::Pipeline>()
            .map_err(|_| DriverError::NotAPipeline)?;

        Self::from_pipeline(pipeline)
    }

    /// Resolve the camera and capture branches among the pipeline's children.
    pub fn from_pipeline(pipeline: gst::Pipeline) -> Result<Self> {
        let children = pipeline
            .children()
            .into_iter()
            .map(|element| (element.name(), element));
        let (camera, image_branch, video_branch) =
            ElementRegistry::from_named(children)?.into_parts();

        debug!(
            camera = %camera.name(),
            image_branch = %image_branch.name(),
            video_branch = video_branch.is_some(),
            "resolved pipeline elements"
        );

        Ok(Self {
            pipeline,
            camera,
            image_branch,
            video_branch,
        })
    }

    /// The top-level pipeline.
    pub const fn pipeline(&self) -> &gst::Pipeline {
        &self.pipeline
    }

    /// The camera element.
    pub const fn camera(&self) -> &gst::Element {
        &self.camera
    }

    /// The image capture branch.
    pub const fn image_branch(&self) -> &gst::Element {
        &self.image_branch
    }

    /// The video capture branch, if any.
    pub const fn video_branch(&self) -> Option<&gst::Element> {
        self.video_branch.as_ref()
    }

    /// Whether the image branch is currently a child of the pipeline.
    pub fn image_branch_attached(&self) -> bool {
        self.image_branch
            .parent()
            .is_some_and(|parent| parent == *self.pipeline.upcast_ref::<gst::Object>())
    }
}

fn request_state(element: &gst::Element, state: ElementState) -> Result<StateChange> {
    element
        .set_state(state.into())
        .map(StateChange::from)
        .map_err(|err| DriverError::StateChange {
            target: state,
            reason: format!("{} refused: {err}", element.name()),
        })
}

impl CaptureBackend for GstCapturePipeline {
    fn set_camera_mode(&mut self, mode: CameraMode) -> Result<()> {
        let unsupported = || DriverError::PropertyNotSupported {
            element: self.camera.name().to_string(),
            property: MODE_PROPERTY.to_owned(),
        };
        let pspec = self
            .camera
            .find_property(MODE_PROPERTY)
            .ok_or_else(unsupported)?;

        if let Some(enum_spec) = pspec.downcast_ref::<glib::ParamSpecEnum>() {
            if enum_spec.enum_class().value_by_nick(mode.nick()).is_none() {
                return Err(DriverError::InvalidMode {
                    element: self.camera.name().to_string(),
                    mode,
                });
            }
            self.camera.set_property_from_str(MODE_PROPERTY, mode.nick());
        } else if pspec.value_type() == glib::Type::STRING {
            self.camera.set_property(MODE_PROPERTY, mode.nick());
        } else {
            return Err(unsupported());
        }

        debug!(camera = %self.camera.name(), %mode, "camera mode set");
        Ok(())
    }

    fn attach_image_branch(&mut self) -> Result<()> {
        self.pipeline
            .add(&self.image_branch)
            .map_err(|err| DriverError::Graph(format!("attach {}: {err}", self.image_branch.name())))
    }

    fn detach_image_branch(&mut self) -> Result<()> {
        self.pipeline
            .remove(&self.image_branch)
            .map_err(|err| DriverError::Graph(format!("detach {}: {err}", self.image_branch.name())))
    }

    fn set_pipeline_state(&mut self, state: ElementState) -> Result<StateChange> {
        request_state(self.pipeline.upcast_ref::<gst::Element>(), state)
    }

    fn set_image_branch_state(&mut self, state: ElementState) -> Result<StateChange> {
        request_state(&self.image_branch, state)
    }
}

/// Numeric code of an error in one of the GStreamer error domains.
fn error_code(error: &glib::Error) -> Option<i32> {
    error
        .kind::<gst::CoreError>()
        .map(IntoGlib::into_glib)
        .or_else(|| error.kind::<gst::LibraryError>().map(IntoGlib::into_glib))
        .or_else(|| error.kind::<gst::ResourceError>().map(IntoGlib::into_glib))
        .or_else(|| error.kind::<gst::StreamError>().map(IntoGlib::into_glib))
}

/// Convert a bus message into the driver's view of it.
///
/// `pipeline` decides whether a state change comes from the top level.
pub fn translate(message: &gst::Message, pipeline: &gst::Pipeline) -> BusMessage {
    use gst::MessageView;

    let source = message
        .src()
        .map_or_else(|| "(unknown)".to_owned(), |src| src.path_string().to_string());

    match message.view() {
        MessageView::Error(err) => {
            let error = err.error();
            BusMessage::Error {
                source,
                domain: error.domain().as_str().to_string(),
                code: error_code(&error),
                message: error.message().to_owned(),
                debug: err.debug().map(|debug| debug.to_string()),
            }
        }
        MessageView::Eos(..) => BusMessage::EndOfStream,
        MessageView::StateChanged(changed) => BusMessage::StateChanged {
            source,
            from_pipeline: message.src() == Some(pipeline.upcast_ref::<gst::Object>()),
            old: changed.old().into(),
            current: changed.current().into(),
            pending: changed.pending().into(),
        },
        _ => BusMessage::Other,
    }
}
