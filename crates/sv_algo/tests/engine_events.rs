// crates/sv_algo/tests/engine_events.rs
// The engine emits one debug event per round and one per applied move.
// With no tracing subscriber installed these reach the `log` facade, which
// this test binary captures. Single test so no other run interleaves.

use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use sv_algo::{BestResponseEngine, Plurality};
use sv_core::PreferenceProfile;

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        LINES.lock().unwrap().push(record.args().to_string());
    }
    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

#[test]
fn one_debug_event_per_round_and_per_move() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let rows = vec![vec![1, 2], vec![1, 2], vec![2, 1]];
    let p = PreferenceProfile::new(3, 2, &rows).unwrap();
    let res = BestResponseEngine::new(Plurality, &p).run();
    assert_eq!(res.rounds_used, 2);

    let lines = LINES.lock().unwrap();
    let rounds = lines.iter().filter(|l| l.contains("round started")).count();
    let moves = lines.iter().filter(|l| l.contains("voter deviated")).count();
    assert_eq!(rounds, 2, "{lines:?}");
    assert_eq!(moves, 1, "{lines:?}");
}
