//! Mock backend for testing the driver without GStreamer.

use crate::traits::{CameraMode, CaptureBackend, DriverError, ElementState, Result, StateChange};

/// A backend call recorded by [`MockBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    /// `set_camera_mode`
    SetCameraMode(CameraMode),
    /// `attach_image_branch`
    AttachImageBranch,
    /// `detach_image_branch`
    DetachImageBranch,
    /// `set_pipeline_state`
    SetPipelineState(ElementState),
    /// `set_image_branch_state`
    SetImageBranchState(ElementState),
}

/// Mock backend that records calls and tracks branch attachment.
pub struct MockBackend {
    calls: Vec<BackendCall>,
    image_attached: bool,
    camera_mode: Option<CameraMode>,
    pipeline_state: ElementState,
    state_result: StateChange,
    fail_on: Option<BackendCall>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock with the image branch attached, as after parsing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            calls: Vec::new(),
            image_attached: true,
            camera_mode: None,
            pipeline_state: ElementState::Null,
            state_result: StateChange::Success,
            fail_on: None,
        }
    }

    /// Make state change requests report this outcome.
    #[must_use]
    pub fn with_state_result(mut self, result: StateChange) -> Self {
        self.state_result = result;
        self
    }

    /// Fail the first call equal to `call`.
    #[must_use]
    pub fn failing_on(mut self, call: BackendCall) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Whether the image branch is currently in the pipeline.
    pub const fn image_attached(&self) -> bool {
        self.image_attached
    }

    /// Last mode set on the camera.
    pub const fn camera_mode(&self) -> Option<CameraMode> {
        self.camera_mode
    }

    /// Last state requested on the pipeline.
    pub const fn pipeline_state(&self) -> ElementState {
        self.pipeline_state
    }

    fn record(&mut self, call: BackendCall) -> Result<()> {
        self.calls.push(call);
        if self.fail_on == Some(call) {
            self.fail_on = None;
            return Err(DriverError::Graph(format!("mock failure on {call:?}")));
        }
        Ok(())
    }
}

impl CaptureBackend for MockBackend {
    fn set_camera_mode(&mut self, mode: CameraMode) -> Result<()> {
        self.record(BackendCall::SetCameraMode(mode))?;
        self.camera_mode = Some(mode);
        Ok(())
    }

    fn attach_image_branch(&mut self) -> Result<()> {
        self.record(BackendCall::AttachImageBranch)?;
        if self.image_attached {
            return Err(DriverError::Graph("image branch already attached".to_owned()));
        }
        self.image_attached = true;
        Ok(())
    }

    fn detach_image_branch(&mut self) -> Result<()> {
        self.record(BackendCall::DetachImageBranch)?;
        if !self.image_attached {
            return Err(DriverError::Graph("image branch not attached".to_owned()));
        }
        self.image_attached = false;
        Ok(())
    }

    fn set_pipeline_state(&mut self, state: ElementState) -> Result<StateChange> {
        self.record(BackendCall::SetPipelineState(state))?;
        self.pipeline_state = state;
        Ok(self.state_result)
    }

    fn set_image_branch_state(&mut self, state: ElementState) -> Result<StateChange> {
        self.record(BackendCall::SetImageBranchState(state))?;
        Ok(self.state_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let mut backend = MockBackend::new();
        backend
            .set_camera_mode(CameraMode::Preview)
            .expect("set_camera_mode should succeed");
        backend.detach_image_branch().expect("detach should succeed");

        assert_eq!(
            backend.calls(),
            [
                BackendCall::SetCameraMode(CameraMode::Preview),
                BackendCall::DetachImageBranch,
            ]
        );
        assert_eq!(backend.camera_mode(), Some(CameraMode::Preview));
        assert!(!backend.image_attached());
    }

    #[test]
    fn test_mock_rejects_double_attach() {
        let mut backend = MockBackend::new();
        assert!(backend.attach_image_branch().is_err());
        backend.detach_image_branch().expect("detach should succeed");
        assert!(backend.detach_image_branch().is_err());
    }

    #[test]
    fn test_mock_fails_once() {
        let mut backend =
            MockBackend::new().failing_on(BackendCall::SetPipelineState(ElementState::Playing));
        assert!(backend.set_pipeline_state(ElementState::Playing).is_err());
        assert_eq!(
            backend
                .set_pipeline_state(ElementState::Playing)
                .expect("second request should succeed"),
            StateChange::Success
        );
    }
}
