//! Discovery scan behavior against scripted endpoints.

use penstream_communication::{locate, DeviceScanner};
use penstream_core::PlotError;
use std::collections::HashMap;

/// Scanner over a fixed set of simulated endpoints.
///
/// `None` simulates an endpoint that fails to open or respond; the probe
/// order is recorded so tests can assert scan behavior.
struct ScriptedScanner {
    ports: Vec<&'static str>,
    responses: HashMap<&'static str, Option<&'static str>>,
    probed: Vec<String>,
}

impl ScriptedScanner {
    fn new(ports: Vec<&'static str>, responses: Vec<(&'static str, Option<&'static str>)>) -> Self {
        Self {
            ports,
            responses: responses.into_iter().collect(),
            probed: Vec::new(),
        }
    }
}

impl DeviceScanner for ScriptedScanner {
    fn endpoints(&mut self) -> Vec<String> {
        self.ports.iter().map(|p| p.to_string()).collect()
    }

    fn probe(&mut self, port_name: &str) -> Option<String> {
        self.probed.push(port_name.to_string());
        self.responses
            .get(port_name)
            .copied()
            .flatten()
            .map(|r| r.to_string())
    }
}

#[test]
fn scan_stops_at_first_match() {
    let mut scanner = ScriptedScanner::new(
        vec!["COM1", "COM2", "COM3"],
        vec![
            ("COM1", Some("[VER:1.1f.20170801:]")),
            ("COM2", Some("[VER:1.1h DrawCore:]\r\nok\r\n")),
            ("COM3", Some("[VER:1.1h DrawCore:]\r\nok\r\n")),
        ],
    );

    let handle = locate(&mut scanner, "DrawCore").unwrap();
    assert_eq!(handle.port_name, "COM2");
    // COM3 also matches but must never be queried.
    assert_eq!(scanner.probed, vec!["COM1", "COM2"]);
}

#[test]
fn exhausted_scan_probes_every_endpoint_once_in_order() {
    let mut scanner = ScriptedScanner::new(
        vec!["/dev/ttyUSB0", "/dev/ttyUSB1", "/dev/ttyACM0"],
        vec![
            ("/dev/ttyUSB0", Some("[VER:1.1f.20170801:]")),
            ("/dev/ttyUSB1", Some("ok")),
            ("/dev/ttyACM0", None),
        ],
    );

    let err = locate(&mut scanner, "DrawCore").unwrap_err();
    assert!(matches!(err, PlotError::DeviceNotFound));
    assert_eq!(
        scanner.probed,
        vec!["/dev/ttyUSB0", "/dev/ttyUSB1", "/dev/ttyACM0"]
    );
}

#[test]
fn failing_endpoint_does_not_abort_the_scan() {
    let mut scanner = ScriptedScanner::new(
        vec!["COM1", "COM2"],
        vec![
            ("COM1", None), // open/read failure, treated as silence
            ("COM2", Some("[OPT:DRAWBOT,15,128]")),
        ],
    );

    let handle = locate(&mut scanner, "DRAWBOT").unwrap();
    assert_eq!(handle.port_name, "COM2");
}

#[test]
fn empty_response_never_matches() {
    let mut scanner = ScriptedScanner::new(vec!["COM1"], vec![("COM1", Some(""))]);

    // Even an empty identifier must not match an empty response.
    let err = locate(&mut scanner, "").unwrap_err();
    assert!(matches!(err, PlotError::DeviceNotFound));
}

#[test]
fn identifier_match_is_case_sensitive() {
    let mut scanner = ScriptedScanner::new(
        vec!["COM1"],
        vec![("COM1", Some("[VER:1.1h drawcore:]"))],
    );

    let err = locate(&mut scanner, "DrawCore").unwrap_err();
    assert!(matches!(err, PlotError::DeviceNotFound));
}
