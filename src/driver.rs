//! Three-phase camera mode demo, independent of the media framework.
//!
//! Once the pipeline reaches `PLAYING`, the driver waits one phase delay,
//! switches the camera to image mode and re-attaches the image branch, waits
//! again, switches back to preview, waits again and stops the pipeline.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::traits::{BusMessage, CameraMode, CaptureBackend, ElementState, Result, StateChange};

/// A step of the timer driven sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Switch the camera to image mode and attach the image branch.
    ImageMode,
    /// Switch the camera back to preview mode.
    PreviewMode,
    /// Stop the pipeline.
    Finish,
}

impl Phase {
    /// Phase for a counter value, `None` once the sequence is over.
    #[must_use]
    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::ImageMode),
            1 => Some(Self::PreviewMode),
            2 => Some(Self::Finish),
            _ => None,
        }
    }

    /// Whether another phase follows this one.
    #[must_use]
    pub const fn has_next(self) -> bool {
        !matches!(self, Self::Finish)
    }
}

/// Drives a [`CaptureBackend`] through the preview / image / stop sequence.
pub struct DemoDriver<B> {
    backend: B,
    phase_delay: Duration,
    phase: u32,
    armed: bool,
}

impl<B: CaptureBackend> DemoDriver<B> {
    /// Create a driver that waits `phase_delay` between phases.
    pub const fn new(backend: B, phase_delay: Duration) -> Self {
        Self {
            backend,
            phase_delay,
            phase: 0,
            armed: false,
        }
    }

    /// Put the camera in preview, detach the image branch and start playing.
    ///
    /// The detached image branch is set to `PLAYING` on its own so it is ready
    /// when phase 0 attaches it again.
    pub fn start(&mut self) -> Result<()> {
        self.backend.set_camera_mode(CameraMode::Preview)?;
        self.backend.detach_image_branch()?;

        info!("setting state to playing");
        let ret = self.backend.set_pipeline_state(ElementState::Playing)?;
        info!("setting pipeline to PLAYING: {ret}");

        let ret = self.backend.set_image_branch_state(ElementState::Playing)?;
        info!("setting image branch to PLAYING: {ret}");

        Ok(())
    }

    /// React to a bus message.
    ///
    /// Returns the delay after which the caller must call [`Self::fire_phase`],
    /// if the message arms the sequence.
    pub fn handle_message(&mut self, message: &BusMessage) -> Option<Duration> {
        match message {
            BusMessage::Error {
                source,
                domain,
                code,
                message,
                debug: debug_info,
            } => {
                error!(
                    source = %source,
                    domain = %domain,
                    code = ?code,
                    debug = debug_info.as_deref().unwrap_or(""),
                    "Error: {message}"
                );
                None
            }
            BusMessage::EndOfStream => {
                info!("eos");
                None
            }
            BusMessage::StateChanged {
                source,
                from_pipeline,
                old,
                current,
                pending,
            } => {
                info!("State Changed: {source}: {old} --> {current} (pending {pending})");
                if !*from_pipeline || *current != ElementState::Playing {
                    return None;
                }
                if self.armed {
                    debug!("pipeline playing again, sequence already armed");
                    return None;
                }
                info!("State Change complete.. triggering next step");
                self.armed = true;
                Some(self.phase_delay)
            }
            BusMessage::Other => None,
        }
    }

    /// Run the next phase of the sequence.
    ///
    /// Returns the delay before the following phase, or `None` when the
    /// sequence has ended. The counter advances before the phase runs, so a
    /// failed phase is never retried.
    pub fn fire_phase(&mut self) -> Result<Option<Duration>> {
        let Some(phase) = Phase::from_index(self.phase) else {
            debug!(phase = self.phase, "sequence already finished");
            return Ok(None);
        };
        self.phase += 1;

        match phase {
            Phase::ImageMode => {
                info!("switching to image mode");
                self.backend.set_camera_mode(CameraMode::Image)?;
                self.backend.attach_image_branch()?;
            }
            Phase::PreviewMode => {
                info!("switching to preview mode");
                self.backend.set_camera_mode(CameraMode::Preview)?;
            }
            Phase::Finish => {
                info!("finishing up");
                let ret = self.backend.set_pipeline_state(ElementState::Null)?;
                if ret != StateChange::Success {
                    warn!("pipeline stop returned {ret}");
                }
            }
        }

        Ok(phase.has_next().then_some(self.phase_delay))
    }

    /// Number of phases fired so far.
    pub const fn phases_fired(&self) -> u32 {
        self.phase
    }

    /// Whether phase 0 has been scheduled.
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// The controlled backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}
