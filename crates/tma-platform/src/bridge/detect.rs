use std::rc::Rc;

use tma_core::ports::{BridgeDetectorPort, HostBridgePort};

/// Detector for environments without a host bridge (plain browser, native).
#[derive(Debug, Clone, Default)]
pub struct NoBridgeDetector;

impl BridgeDetectorPort for NoBridgeDetector {
    fn detect(&self) -> Option<Rc<dyn HostBridgePort>> {
        None
    }
}

/// Detector that hands out a bridge chosen at wiring time.
#[derive(Clone, Default)]
pub struct FixedDetector {
    bridge: Option<Rc<dyn HostBridgePort>>,
}

impl FixedDetector {
    pub fn new(bridge: Rc<dyn HostBridgePort>) -> Self {
        Self {
            bridge: Some(bridge),
        }
    }
}

impl BridgeDetectorPort for FixedDetector {
    fn detect(&self) -> Option<Rc<dyn HostBridgePort>> {
        self.bridge.clone()
    }
}
