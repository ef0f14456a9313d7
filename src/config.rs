//! Demo configuration.

use std::time::Duration;

/// File pattern for captured images, numbered by `multifilesink`.
pub const DEFAULT_CAPTURE_LOCATION: &str = "test_imagecapture_%02d.jpg";

/// Delay between phases of the sequence.
pub const DEFAULT_PHASE_DELAY: Duration = Duration::from_secs(10);

/// Settings for one demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// `gst-launch` style pipeline description.
    pub description: String,
    /// Delay between phases.
    pub phase_delay: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            description: Self::capture_description(DEFAULT_CAPTURE_LOCATION),
            phase_delay: DEFAULT_PHASE_DELAY,
        }
    }
}

impl DemoConfig {
    /// The OMX camera pipeline, writing JPEG captures to `location`.
    ///
    /// The camera feeds a 640x480 UYVY preview to `v4l2sink`; its image pad
    /// feeds the `imgbin` bin, which the driver detaches during preview.
    #[must_use]
    pub fn capture_description(location: &str) -> String {
        format!(
            "omx_camera name=cam vstab=false vnf=off output-buffers=6 image-output-buffers=1 \
             cam.src ! ( queue ! video/x-raw-yuv-strided, format=(fourcc)UYVY, width=640, \
             height=480, framerate=30/1, buffer-count-requested=6 ! v4l2sink sync=false ) \
             cam.imgsrc ! ( name=imgbin queue ! image/jpeg, width=640, height=480 ! \
             multifilesink location={location} )"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.phase_delay, Duration::from_secs(10));
        assert!(config.description.starts_with("omx_camera name=cam "));
        assert!(config
            .description
            .contains("multifilesink location=test_imagecapture_%02d.jpg"));
        assert!(config.description.contains("name=imgbin"));
    }

    #[test]
    fn test_custom_location() {
        let description = DemoConfig::capture_description("/tmp/shot_%03d.jpg");
        assert!(description.contains("location=/tmp/shot_%03d.jpg )"));
    }
}
