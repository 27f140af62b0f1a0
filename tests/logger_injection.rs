use lattice_walk::adapters::inbound::ScriptedTickSource;
use lattice_walk::adapters::outbound::{InMemoryPathSink, MultiLogger};
use lattice_walk::application::{SimulationRunner, WalkSession};
use lattice_walk::domains::logger::DomainLogger;
use lattice_walk::domains::walker::Signal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("INFO:{}", msg));
    }
    fn warn(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("WARN:{}", msg));
    }
    fn error(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("ERR:{}", msg));
    }
}

#[tokio::test]
async fn test_buffered_and_noop_logger() {
    let capture = Arc::new(BridgeCapture::new());
    let bridge = capture.clone() as Arc<dyn DomainLogger>;

    let buffered = lattice_walk::adapters::outbound::init_buffered_logger(bridge.clone(), 8);

    buffered.info("one");
    buffered.warn("two");
    buffered.error("three");

    tokio::time::sleep(Duration::from_millis(50)).await;

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m.contains("INFO:one")));
    assert!(msgs.iter().any(|m| m.contains("WARN:two")));
    assert!(msgs.iter().any(|m| m.contains("ERR:three")));

    let noop = lattice_walk::adapters::outbound::init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");
}

#[test]
fn test_multi_logger_forwards_to_both() {
    let primary = Arc::new(BridgeCapture::new());
    let secondary = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(
        primary.clone() as Arc<dyn DomainLogger>,
        Some(secondary.clone() as Arc<dyn DomainLogger>),
    );

    multi.warn("careful");

    assert_eq!(*primary.messages.lock().unwrap(), vec!["WARN:careful"]);
    assert_eq!(*secondary.messages.lock().unwrap(), vec!["WARN:careful"]);
}

#[tokio::test]
async fn test_runner_logs_resets_and_rejections() {
    let capture = Arc::new(BridgeCapture::new());
    let mut runner = SimulationRunner::new(
        WalkSession::new(),
        Arc::new(InMemoryPathSink::new()),
        capture.clone() as Arc<dyn DomainLogger>,
    );

    let summary = runner
        .run(&mut ScriptedTickSource::new(vec![Signal::Reset, Signal::Tick]))
        .await
        .unwrap();
    let walker_id = summary.walker_id.unwrap();

    let mut fresh = SimulationRunner::new(
        WalkSession::new(),
        Arc::new(InMemoryPathSink::new()),
        capture.clone() as Arc<dyn DomainLogger>,
    );
    assert!(fresh
        .run(&mut ScriptedTickSource::new(vec![Signal::Tick]))
        .await
        .is_err());

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs
        .iter()
        .any(|m| m == &format!("INFO:Walker {} reset at origin", walker_id)));
    assert!(msgs
        .iter()
        .any(|m| m.starts_with("INFO:Run finished: 1 resets, 1 steps")));
    assert!(msgs
        .iter()
        .any(|m| m.starts_with("ERR:Step rejected: Walker not initialized")));
}
