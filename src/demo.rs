//! Runs the driver inside a GLib main loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use gstreamer as gst;
use gstreamer::glib;
use gstreamer::prelude::*;
use tracing::{error, info};

use crate::config::DemoConfig;
use crate::driver::DemoDriver;
use crate::pipeline::{translate, GstCapturePipeline};
use crate::traits::{BusMessage, CaptureBackend, DriverError, Result};

type SharedDriver<B> = Arc<Mutex<DemoDriver<B>>>;

/// Build the pipeline, start the sequence and block in the main loop.
///
/// Only returns on setup failure: the loop is never quit, the process is
/// expected to be killed once the pipeline has stopped.
pub fn run(config: &DemoConfig) -> Result<()> {
    gst::init().map_err(|err| DriverError::Init(err.to_string()))?;

    let backend = GstCapturePipeline::launch(&config.description)?;
    let pipeline = backend.pipeline().clone();
    let bus = pipeline.bus().ok_or(DriverError::NoBus)?;
    bus.enable_sync_message_emission();
    bus.add_signal_watch();

    // Messages posted during startup stay queued on the bus until the loop runs.
    let mut driver = DemoDriver::new(backend, config.phase_delay);
    driver.start()?;
    let handler: SharedDriver<_> = Arc::new(Mutex::new(driver));

    let context = glib::MainContext::default();
    let bus_context = context.clone();
    let weak_pipeline = pipeline.downgrade();
    bus.connect_message(None, move |_bus, message| {
        let Some(pipeline) = weak_pipeline.upgrade() else {
            return;
        };
        dispatch_message(&bus_context, &handler, &translate(message, &pipeline));
    });

    let main_loop = glib::MainLoop::new(Some(&context), false);
    info!("running main loop");
    main_loop.run();

    Ok(())
}

/// Hand a bus message to the driver, scheduling phase 0 if it arms the sequence.
fn dispatch_message<B>(context: &glib::MainContext, driver: &SharedDriver<B>, message: &BusMessage)
where
    B: CaptureBackend + Send + 'static,
{
    let delay = match driver.lock() {
        Ok(mut driver) => driver.handle_message(message),
        Err(_) => {
            error!("driver lock poisoned, dropping bus message");
            return;
        }
    };
    if let Some(delay) = delay {
        schedule_phase(context, Arc::clone(driver), delay);
    }
}

/// Fire the driver's next phase after `delay`, chaining the following one.
///
/// Each timeout is one-shot; the next phase gets its own timeout.
fn schedule_phase<B>(context: &glib::MainContext, driver: SharedDriver<B>, delay: Duration)
where
    B: CaptureBackend + Send + 'static,
{
    let chain_context = context.clone();
    let source = glib::timeout_source_new(delay, None, glib::Priority::DEFAULT, move || {
        let next = match driver.lock() {
            Ok(mut driver) => driver.fire_phase(),
            Err(_) => {
                error!("driver lock poisoned, abandoning sequence");
                return glib::ControlFlow::Break;
            }
        };

        match next {
            Ok(Some(delay)) => schedule_phase(&chain_context, Arc::clone(&driver), delay),
            Ok(None) => info!("sequence complete"),
            Err(err) => error!("phase failed, abandoning sequence: {err}"),
        }

        glib::ControlFlow::Break
    });
    source.attach(Some(context));
}
