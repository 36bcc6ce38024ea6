use celery_core::Viewport;
use celery_link::Transport;
use celery_protocol::{Command, Opcode};
use celery_render::mesh::{Mesh, CUBE};
use celery_render::scene::{model_matrix, CameraConfig, Scene};
use celery_render::VertexTransformer;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::DriverConfig;
use crate::error::DriverError;
use crate::pacing::{Clock, FramePacer, FrameStats, SystemClock};
use crate::state::{DriverState, StopReason};

/// Bytes sent per frame for `mesh`: CLEAR_FB, CLEAR_DEPTH and one TRIANGLE
/// per triangle.
pub fn frame_bytes(mesh: &Mesh) -> usize {
    Opcode::ClearFramebuffer.command_len()
        + Opcode::ClearDepth.command_len()
        + mesh.triangle_count() * Opcode::Triangle.command_len()
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reason: StopReason,
    pub frames: u64,
    pub bytes_sent: u64,
    pub skipped_triangles: u64,
    pub stats: FrameStats,
}

/// Streams the rotating cube to the GPU.
///
/// Owns the transport for its whole life and closes it on every exit path
/// out of [`AnimationDriver::run`].
pub struct AnimationDriver<T: Transport, C: Clock = SystemClock> {
    transport: T,
    clock: C,
    config: DriverConfig,
    scene: Scene,
    transformer: VertexTransformer,
    mesh: Mesh,
    pacer: FramePacer,
    state: DriverState,
    frame: u64,
    bytes_sent: u64,
    skipped_triangles: u64,
    stats: FrameStats,
    buffer: Vec<u8>,
}

impl<T: Transport> AnimationDriver<T> {
    /// Create a driver that paces against the system clock
    pub fn new(
        transport: T,
        config: DriverConfig,
        camera: &CameraConfig,
        viewport: Viewport,
    ) -> Self {
        Self::with_clock(transport, SystemClock, config, camera, viewport)
    }
}

impl<T: Transport, C: Clock> AnimationDriver<T, C> {
    pub fn with_clock(
        transport: T,
        clock: C,
        config: DriverConfig,
        camera: &CameraConfig,
        viewport: Viewport,
    ) -> Self {
        let mesh = CUBE;
        Self {
            transport,
            clock,
            pacer: FramePacer::new(config.min_frame_interval()),
            scene: Scene::new(camera, viewport),
            transformer: VertexTransformer::new(viewport),
            buffer: Vec::with_capacity(frame_bytes(&mesh)),
            mesh,
            config,
            state: DriverState::Initializing,
            frame: 0,
            bytes_sent: 0,
            skipped_triangles: 0,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Index of the next frame to be rendered
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Send the configuration, then stream frames until `cancel` is set, the
    /// frame limit is reached or the transport fails.
    ///
    /// The transport is closed before this returns, whatever the outcome.
    pub fn run(&mut self, cancel: &CancelToken) -> Result<RunSummary, DriverError> {
        self.transition(DriverState::Running)?;

        let result = self.stream(cancel);
        let closed = self.stop();

        let reason = match (result, closed) {
            (Ok(reason), Ok(())) => reason,
            (Ok(_), Err(e)) => return Err(e.into()),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!("Failed to close transport after error: {}", close_err);
                }
                return Err(e);
            }
        };

        info!(
            "{}: {} frames, {} bytes",
            reason.description(),
            self.frame,
            self.bytes_sent
        );

        Ok(RunSummary {
            reason,
            frames: self.frame,
            bytes_sent: self.bytes_sent,
            skipped_triangles: self.skipped_triangles,
            stats: self.stats.clone(),
        })
    }

    fn transition(&mut self, next: DriverState) -> Result<(), DriverError> {
        if !self.state.can_transition_to(next) {
            return Err(DriverError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!("Driver {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Close the transport and enter Stopped. Safe to call more than once.
    fn stop(&mut self) -> Result<(), celery_link::LinkError> {
        if self.state.is_stopped() {
            return Ok(());
        }
        self.state = DriverState::Stopped;
        let closed = self.transport.close();
        if closed.is_ok() {
            info!("Closed {}", self.transport.describe());
        }
        closed
    }

    fn stream(&mut self, cancel: &CancelToken) -> Result<StopReason, DriverError> {
        self.pause(self.config.startup_delay());

        let flags = self.config.render_flags;
        self.send(&Command::SetConfig(flags).to_bytes())?;
        info!("Sent render config {:?}", flags);
        self.pause(self.config.config_delay());

        loop {
            if cancel.is_cancelled() {
                return Ok(StopReason::Cancelled);
            }
            if self.config.max_frames.is_some_and(|max| self.frame >= max) {
                return Ok(StopReason::FrameLimit);
            }

            let start = self.clock.now();
            self.send_frame()?;
            let frame_time = self.clock.now().saturating_duration_since(start);

            self.stats.record_frame(frame_time);
            self.log_stats();
            self.frame += 1;

            if let Some(remaining) = self.pacer.remaining(frame_time) {
                self.clock.sleep(remaining);
                self.stats.record_sleep(remaining);
            }
        }
    }

    /// Encode the current frame into the buffer and send it in one write,
    /// so a failure never leaves a command half-built on our side.
    fn send_frame(&mut self) -> Result<(), DriverError> {
        let mvp = self.scene.mvp(&model_matrix(self.frame));

        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        Command::ClearFramebuffer(self.config.background_rgb565()).encode_into(&mut buffer);
        Command::ClearDepth.encode_into(&mut buffer);

        for (index, triangle) in self.mesh.triangles().enumerate() {
            match self.transformer.transform_triangle(&triangle, &mvp) {
                Ok(vertices) => Command::Triangle(vertices).encode_into(&mut buffer),
                Err(e) => {
                    warn!("Skipping triangle {} of frame {}: {}", index, self.frame, e);
                    self.skipped_triangles += 1;
                }
            }
        }

        let result = self.send(&buffer);
        self.buffer = buffer;
        result
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), DriverError> {
        self.transport.write_all(bytes)?;
        self.transport.flush()?;
        self.bytes_sent += bytes.len() as u64;
        Ok(())
    }

    fn pause(&mut self, duration: std::time::Duration) {
        if !duration.is_zero() {
            self.clock.sleep(duration);
        }
    }

    fn log_stats(&self) {
        let interval = self.config.stats_interval;
        if interval == 0 || self.frame % interval != 0 {
            return;
        }
        info!(
            "Frame {:4} | {:.1} FPS | {:.1} ms/frame",
            self.frame,
            self.stats.last_fps(),
            self.stats.last_frame_time.as_secs_f64() * 1000.0
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use celery_core::math;
    use celery_link::{LinkError, MemoryTransport};
    use celery_protocol::{CommandDecoder, DecodedCommand, WireVertex};

    use super::*;
    use crate::pacing::ManualClock;

    const FRAME: usize = 1456;

    fn driver(
        transport: MemoryTransport,
        clock: ManualClock,
        max_frames: Option<u64>,
    ) -> AnimationDriver<MemoryTransport, ManualClock> {
        let config = DriverConfig {
            max_frames,
            ..DriverConfig::default().without_delays()
        };
        AnimationDriver::with_clock(
            transport,
            clock,
            config,
            &CameraConfig::default(),
            Viewport::default(),
        )
    }

    #[test]
    fn test_frame_size() {
        assert_eq!(frame_bytes(&CUBE), FRAME);
    }

    #[test]
    fn test_stream_layout() {
        let sink = MemoryTransport::new();
        let mut driver = driver(sink.clone(), ManualClock::new(), Some(2));

        let summary = driver.run(&CancelToken::new()).unwrap();
        assert_eq!(summary.reason, StopReason::FrameLimit);
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.skipped_triangles, 0);

        let bytes = sink.bytes();
        assert_eq!(bytes.len(), 2 + 2 * FRAME);
        assert_eq!(summary.bytes_sent, bytes.len() as u64);
        assert_eq!(&bytes[..2], &[0x04, 0x06]);

        let commands = CommandDecoder::decode_all(&bytes).unwrap();
        assert_eq!(commands.len(), 1 + 2 * 14);
        assert_eq!(commands[0], DecodedCommand::SetConfig(0x06));
        for frame in 0..2 {
            let base = 1 + frame * 14;
            assert_eq!(commands[base], DecodedCommand::ClearFramebuffer(0x18C7));
            assert_eq!(commands[base + 1], DecodedCommand::ClearDepth);
            for command in &commands[base + 2..base + 14] {
                assert_eq!(command.opcode(), Opcode::Triangle);
            }
        }
    }

    #[test]
    fn test_first_frame_matches_direct_transform() {
        let sink = MemoryTransport::new();
        let mut driver = driver(sink.clone(), ManualClock::new(), Some(1));
        driver.run(&CancelToken::new()).unwrap();

        // Frame 0 has no rotation, so the model matrix is the identity
        let scene = Scene::new(&CameraConfig::default(), Viewport::default());
        let mvp = scene.mvp(&math::identity());
        let expected = VertexTransformer::default()
            .transform_triangle(&CUBE.triangle(0), &mvp)
            .unwrap();

        let commands = CommandDecoder::decode_all(&sink.bytes()).unwrap();
        let DecodedCommand::Triangle(records) = &commands[3] else {
            panic!("expected the first triangle, got {:?}", commands[3]);
        };
        for (record, vertex) in records.iter().zip(expected.iter()) {
            assert_eq!(*record, WireVertex::from_vertex(vertex));
        }
    }

    #[test]
    fn test_frames_differ_as_cube_rotates() {
        let sink = MemoryTransport::new();
        let mut driver = driver(sink.clone(), ManualClock::new(), Some(2));
        driver.run(&CancelToken::new()).unwrap();

        let bytes = sink.bytes();
        let first = &bytes[2..2 + FRAME];
        let second = &bytes[2 + FRAME..];
        assert_eq!(&first[..4], &second[..4]);
        assert_ne!(first, second);
    }

    #[test]
    fn test_rotation_repeats_every_period() {
        let sink = MemoryTransport::new();
        let mut driver = driver(sink.clone(), ManualClock::new(), Some(61));
        driver.run(&CancelToken::new()).unwrap();

        let bytes = sink.bytes();
        let frame_at = |n: usize| &bytes[2 + n * FRAME..2 + (n + 1) * FRAME];
        assert_eq!(frame_at(0), frame_at(60));
    }

    #[test]
    fn test_idle_frames_sleep_full_interval() {
        let mut driver = driver(MemoryTransport::new(), ManualClock::new(), Some(3));
        driver.run(&CancelToken::new()).unwrap();

        let sleeps = driver.clock().sleeps();
        assert_eq!(sleeps.len(), 3);
        for sleep in sleeps {
            assert!(*sleep >= Duration::from_millis(150) - Duration::from_micros(1));
        }
    }

    #[test]
    fn test_slow_frames_do_not_sleep() {
        let clock = ManualClock::with_tick(Duration::from_millis(200));
        let mut driver = driver(MemoryTransport::new(), clock, Some(3));
        let summary = driver.run(&CancelToken::new()).unwrap();

        assert!(driver.clock().sleeps().is_empty());
        assert_eq!(summary.stats.last_frame_time, Duration::from_millis(200));
    }

    #[test]
    fn test_partial_frame_cost_sleeps_remainder() {
        let clock = ManualClock::with_tick(Duration::from_millis(100));
        let mut driver = driver(MemoryTransport::new(), clock, Some(2));
        driver.run(&CancelToken::new()).unwrap();

        assert_eq!(
            driver.clock().sleeps(),
            &[Duration::from_millis(50), Duration::from_millis(50)]
        );
    }

    #[test]
    fn test_startup_delays() {
        let config = DriverConfig {
            max_frames: Some(0),
            ..DriverConfig::default()
        };
        let mut driver = AnimationDriver::with_clock(
            MemoryTransport::new(),
            ManualClock::new(),
            config,
            &CameraConfig::default(),
            Viewport::default(),
        );
        driver.run(&CancelToken::new()).unwrap();
        assert_eq!(
            driver.clock().sleeps(),
            &[Duration::from_millis(500), Duration::from_millis(10)]
        );
    }

    #[test]
    fn test_cancel_before_first_frame() {
        let sink = MemoryTransport::new();
        let mut driver = driver(sink.clone(), ManualClock::new(), None);
        let cancel = CancelToken::new();
        cancel.cancel();

        let summary = driver.run(&cancel).unwrap();
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.frames, 0);
        // Only the config went out, and the transport was released
        assert_eq!(sink.bytes(), vec![0x04, 0x06]);
        assert_eq!(sink.close_count(), 1);
        assert_eq!(driver.state(), DriverState::Stopped);
    }

    #[test]
    fn test_write_failure_stops_and_closes() {
        // Config write succeeds, then the second frame's write fails
        let sink = MemoryTransport::new().fail_after_writes(2);
        let mut driver = driver(sink.clone(), ManualClock::new(), None);

        let err = driver.run(&CancelToken::new()).unwrap_err();
        assert!(matches!(err, DriverError::Link(LinkError::Write(_))));
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(sink.close_count(), 1);
        // Whole frames only
        assert_eq!(sink.bytes().len(), 2 + FRAME);
    }

    #[test]
    fn test_run_twice_is_rejected() {
        let sink = MemoryTransport::new();
        let mut driver = driver(sink.clone(), ManualClock::new(), Some(1));
        driver.run(&CancelToken::new()).unwrap();

        let err = driver.run(&CancelToken::new()).unwrap_err();
        assert!(matches!(
            err,
            DriverError::InvalidTransition {
                from: DriverState::Stopped,
                to: DriverState::Running
            }
        ));
        assert_eq!(sink.close_count(), 1);
        assert_eq!(sink.bytes().len(), 2 + FRAME);
    }

    #[test]
    fn test_degenerate_camera_skips_triangles() {
        // Eye on the cube surface puts some vertices at clip w = 0
        let camera = CameraConfig {
            eye: celery_core::Vec3::new(0.0, 0.0, 1.0),
            target: celery_core::Vec3::new(0.0, 0.0, -1.0),
            ..CameraConfig::default()
        };
        let sink = MemoryTransport::new();
        let mut driver = AnimationDriver::with_clock(
            sink.clone(),
            ManualClock::new(),
            DriverConfig {
                max_frames: Some(1),
                ..DriverConfig::default().without_delays()
            },
            &camera,
            Viewport::default(),
        );

        let summary = driver.run(&CancelToken::new()).unwrap();
        assert!(summary.skipped_triangles > 0);
        let expected_len =
            2 + FRAME - summary.skipped_triangles as usize * Opcode::Triangle.command_len();
        assert_eq!(sink.bytes().len(), expected_len);
        // What did go out still frames cleanly
        assert!(CommandDecoder::decode_all(&sink.bytes()).is_ok());
    }
}
