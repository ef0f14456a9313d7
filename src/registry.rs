//! Typed lookup of the pipeline children the driver controls.

use std::fmt;

use crate::traits::{DriverError, Result};

/// Role a pipeline child plays in the capture demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// The camera source element.
    Camera,
    /// The image capture bin.
    ImageSink,
    /// The video capture bin.
    VideoSink,
}

impl ElementRole {
    /// Name prefix that identifies the role.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Camera => "cam",
            Self::ImageSink => "imgbin",
            Self::VideoSink => "vidbin",
        }
    }

    /// Classify an element by name. Prefixes are checked camera first.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        [Self::Camera, Self::ImageSink, Self::VideoSink]
            .into_iter()
            .find(|role| name.starts_with(role.prefix()))
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::ImageSink => "image sink",
            Self::VideoSink => "video sink",
        };
        f.write_str(name)
    }
}

/// Elements resolved by role. Camera and image sink are required.
#[derive(Debug, Clone)]
pub struct ElementRegistry<E> {
    camera: E,
    image_sink: E,
    video_sink: Option<E>,
}

impl<E> ElementRegistry<E> {
    /// Build a registry from `(name, element)` pairs.
    ///
    /// Children whose name matches no role are skipped.
    pub fn from_named<I, S>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, E)>,
        S: AsRef<str>,
    {
        let mut camera = None;
        let mut image_sink = None;
        let mut video_sink = None;

        for (name, element) in elements {
            let Some(role) = ElementRole::classify(name.as_ref()) else {
                continue;
            };
            let slot = match role {
                ElementRole::Camera => &mut camera,
                ElementRole::ImageSink => &mut image_sink,
                ElementRole::VideoSink => &mut video_sink,
            };
            if slot.replace(element).is_some() {
                return Err(DriverError::DuplicateElement(role));
            }
        }

        Ok(Self {
            camera: camera.ok_or(DriverError::MissingElement(ElementRole::Camera))?,
            image_sink: image_sink.ok_or(DriverError::MissingElement(ElementRole::ImageSink))?,
            video_sink,
        })
    }

    /// The camera element.
    pub const fn camera(&self) -> &E {
        &self.camera
    }

    /// The image capture branch.
    pub const fn image_sink(&self) -> &E {
        &self.image_sink
    }

    /// The video capture branch, if the pipeline has one.
    pub const fn video_sink(&self) -> Option<&E> {
        self.video_sink.as_ref()
    }

    /// Consume the registry, returning `(camera, image_sink, video_sink)`.
    pub fn into_parts(self) -> (E, E, Option<E>) {
        (self.camera, self.image_sink, self.video_sink)
    }
}
