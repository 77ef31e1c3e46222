//! Orchestration pass behavior with simulated backends.

use penstream_communication::DeviceScanner;
use penstream_core::constants::IDLE_MESSAGE;
use penstream_core::{DeviceHandle, PlotError, RunRequest};
use penstream_streamer::{PlotRunner, SessionLauncher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Scanner over simulated endpoints, recording every probe.
struct StubScanner {
    ports: Vec<(&'static str, Option<&'static str>)>,
    probed: Arc<Mutex<Vec<String>>>,
}

impl StubScanner {
    fn new(
        ports: Vec<(&'static str, Option<&'static str>)>,
    ) -> (Self, Arc<Mutex<Vec<String>>>) {
        let probed = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                ports,
                probed: probed.clone(),
            },
            probed,
        )
    }
}

impl DeviceScanner for StubScanner {
    fn endpoints(&mut self) -> Vec<String> {
        self.ports.iter().map(|(name, _)| name.to_string()).collect()
    }

    fn probe(&mut self, port_name: &str) -> Option<String> {
        self.probed.lock().unwrap().push(port_name.to_string());
        self.ports
            .iter()
            .find(|(name, _)| *name == port_name)
            .and_then(|(_, response)| response.map(|r| r.to_string()))
    }
}

/// Launcher that records launches instead of opening terminals.
struct StubLauncher {
    fail: bool,
    launched: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl StubLauncher {
    fn new(fail: bool) -> (Self, Arc<Mutex<Vec<(PathBuf, String)>>>) {
        let launched = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                fail,
                launched: launched.clone(),
            },
            launched,
        )
    }
}

impl SessionLauncher for StubLauncher {
    fn launch(
        &self,
        _interpreter: &Path,
        _script: &Path,
        artifact: &Path,
        device: &DeviceHandle,
        _banner: &[&str],
    ) -> penstream_core::Result<()> {
        if self.fail {
            return Err(PlotError::Launch {
                reason: "session process could not be started".to_string(),
            });
        }
        self.launched
            .lock()
            .unwrap()
            .push((artifact.to_path_buf(), device.port_name.clone()));
        Ok(())
    }
}

fn idraw_ports() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("COM1", Some("[VER:1.1f.20170801:]\r\nok\r\n")),
        ("COM7", Some("[VER:1.1h DrawCore-20231201:]\r\nok\r\n")),
        ("COM9", Some("[VER:1.1h DrawCore-20231201:]\r\nok\r\n")),
    ]
}

/// Workspace for one test: an interpreter file that exists and an output
/// directory that does not yet.
fn fixtures(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let interpreter = dir.path().join("python3");
    std::fs::write(&interpreter, "#!/bin/sh\n").unwrap();
    let output = dir.path().join("gcode");
    (interpreter, output)
}

fn request(identifier: &str, output: &Path, interpreter: &Path) -> RunRequest {
    RunRequest::new(
        identifier,
        vec![
            "$H".to_string(),
            "G0 X10 Y10".to_string(),
            "$SLP".to_string(),
        ],
        output,
        interpreter,
    )
}

#[test]
fn readout_before_any_run_is_idle() {
    let (scanner, probed) = StubScanner::new(idraw_ports());
    let (launcher, _) = StubLauncher::new(false);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let status = runner.activate(&RunRequest::readout()).unwrap();
    assert_eq!(status, IDLE_MESSAGE);
    assert!(probed.lock().unwrap().is_empty());
}

#[test]
fn empty_identifier_fails_before_any_side_effect() {
    let dir = tempfile::tempdir().unwrap();
    let (interpreter, output) = fixtures(&dir);

    let (scanner, probed) = StubScanner::new(idraw_ports());
    let (launcher, launched) = StubLauncher::new(false);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let err = runner
        .activate(&request("   ", &output, &interpreter))
        .unwrap_err();

    assert!(matches!(err, PlotError::EmptyIdentifier));
    assert!(err.is_validation());
    assert!(!runner.last_message().is_empty());
    // No endpoint opened, no directory created, no file written.
    assert!(probed.lock().unwrap().is_empty());
    assert!(launched.lock().unwrap().is_empty());
    assert!(!output.exists());
}

#[test]
fn missing_interpreter_is_a_validation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (_, output) = fixtures(&dir);
    let bogus = dir.path().join("no-such-python");

    let (scanner, probed) = StubScanner::new(idraw_ports());
    let (launcher, _) = StubLauncher::new(false);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let err = runner
        .activate(&request("DrawCore", &output, &bogus))
        .unwrap_err();

    assert!(matches!(err, PlotError::InterpreterNotFound { .. }));
    assert!(probed.lock().unwrap().is_empty());
}

#[test]
fn successful_run_persists_and_launches() {
    let dir = tempfile::tempdir().unwrap();
    let (interpreter, output) = fixtures(&dir);

    let (scanner, probed) = StubScanner::new(idraw_ports());
    let (launcher, launched) = StubLauncher::new(false);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let status = runner
        .activate(&request("DrawCore", &output, &interpreter))
        .unwrap();

    // The scan stopped at the first matching endpoint.
    assert_eq!(*probed.lock().unwrap(), vec!["COM1", "COM7"]);
    assert_eq!(runner.device().unwrap().port_name, "COM7");

    // The artifact exists, carries the provenance line, and preserves
    // command order.
    let launches = launched.lock().unwrap();
    let (artifact, port) = launches.first().unwrap();
    assert_eq!(port, "COM7");
    assert_eq!(status, format!("G-code saved to: {}", artifact.display()));

    let content = std::fs::read_to_string(artifact).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].starts_with(";Created with penstream"));
    assert_eq!(&lines[1..], ["$H", "G0 X10 Y10", "$SLP"]);

    // The readout is now idempotent on the success message.
    drop(launches);
    let readout = runner.activate(&RunRequest::readout()).unwrap();
    assert_eq!(readout, status);
}

#[test]
fn device_is_cached_across_passes() {
    let dir = tempfile::tempdir().unwrap();
    let (interpreter, output) = fixtures(&dir);

    let (scanner, probed) = StubScanner::new(idraw_ports());
    let (launcher, launched) = StubLauncher::new(false);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let req = request("DrawCore", &output, &interpreter);
    runner.activate(&req).unwrap();
    runner.activate(&req).unwrap();

    // Second pass reused the cached handle without probing again.
    assert_eq!(*probed.lock().unwrap(), vec!["COM1", "COM7"]);
    assert_eq!(launched.lock().unwrap().len(), 2);
}

#[test]
fn failed_discovery_does_not_poison_future_passes() {
    let dir = tempfile::tempdir().unwrap();
    let (interpreter, output) = fixtures(&dir);

    let (scanner, probed) = StubScanner::new(vec![
        ("COM1", Some("[VER:1.1f.20170801:]")),
        ("COM2", None),
    ]);
    let (launcher, _) = StubLauncher::new(false);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let req = request("DrawCore", &output, &interpreter);
    let err = runner.activate(&req).unwrap_err();
    assert!(err.is_device_not_found());
    assert!(runner.device().is_none());

    // The next activation scans again rather than reusing a failure.
    let _ = runner.activate(&req).unwrap_err();
    assert_eq!(probed.lock().unwrap().len(), 4);
}

#[test]
fn launch_failure_is_reported_and_keeps_caches() {
    let dir = tempfile::tempdir().unwrap();
    let (interpreter, output) = fixtures(&dir);

    let (scanner, _) = StubScanner::new(idraw_ports());
    let (launcher, _) = StubLauncher::new(true);
    let mut runner = PlotRunner::with_backends(Box::new(scanner), Box::new(launcher));

    let err = runner
        .activate(&request("DrawCore", &output, &interpreter))
        .unwrap_err();

    assert!(matches!(err, PlotError::Launch { .. }));
    assert_eq!(runner.last_message(), err.to_string());

    // Device and script caches stay valid for the next pass.
    assert_eq!(runner.device().unwrap().port_name, "COM7");

    // No run has ever succeeded, so the non-triggered readout stays idle.
    let readout = runner.activate(&RunRequest::readout()).unwrap();
    assert_eq!(readout, IDLE_MESSAGE);
}
