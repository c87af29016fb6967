/*!
 * Process State Machine Tests
 * CPU and blocking slices, interrupt routing, and construction
 */

use mockall::mock;
use pretty_assertions::assert_eq;
use process_sim::{InterruptHandler, Process, ProcessError, SchedulerInterrupt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;

mock! {
    pub Queue {}

    impl InterruptHandler for Queue {
        fn emit_interrupt(&self, process: &Process, interrupt: SchedulerInterrupt);
    }
}

fn quiet_queue() -> Arc<MockQueue> {
    let mut queue = MockQueue::new();
    queue.expect_emit_interrupt().never();
    Arc::new(queue)
}

fn expecting(pid: u32, kind: SchedulerInterrupt, times: usize) -> Arc<MockQueue> {
    let mut queue = MockQueue::new();
    queue
        .expect_emit_interrupt()
        .withf(move |process, interrupt| process.pid() == pid && *interrupt == kind)
        .times(times)
        .return_const(());
    Arc::new(queue)
}

fn is_parent<Q>(process: &Process, queue: &Arc<Q>) -> bool {
    process
        .parent_queue()
        .map(|parent| Arc::as_ptr(&parent) as *const () == Arc::as_ptr(queue) as *const ())
        .unwrap_or(false)
}

#[test]
fn test_compute_bound_scenario() {
    let queue = quiet_queue();
    let mut rng = StdRng::seed_from_u64(7);
    let mut process = Process::new(1, Some(50), false, &mut rng);
    process.set_parent_queue(&queue);

    process.execute_process(30).unwrap();
    assert_eq!(process.cpu_time_remaining(), 20);
    assert!(!process.is_finished());
    assert!(!process.is_state_changed());

    process.execute_process(30).unwrap();
    assert_eq!(process.cpu_time_remaining(), 0);
    assert!(process.is_finished());
    assert!(!process.is_state_changed());
}

#[test]
fn test_blocking_scenario() {
    let blocked = expecting(2, SchedulerInterrupt::ProcessBlocked, 1);
    let mut process = Process::with_requirements(2, 50, 10);
    process.set_parent_queue(&blocked);

    process.execute_process(5).unwrap();

    assert_eq!(process.cpu_time_remaining(), 50);
    assert_eq!(process.blocking_time_remaining(), 10);
    assert!(process.is_state_changed());
    assert!(!process.is_finished());
}

#[test]
fn test_blocking_then_ready_scenario() {
    let blocked = expecting(2, SchedulerInterrupt::ProcessBlocked, 1);
    let mut process = Process::with_requirements(2, 50, 10);
    process.set_parent_queue(&blocked);
    process.execute_process(5).unwrap();

    let ready = expecting(2, SchedulerInterrupt::ProcessReady, 1);
    process.set_parent_queue(&ready);

    process.execute_blocking_process(4).unwrap();
    assert_eq!(process.blocking_time_remaining(), 6);
    assert_eq!(process.cpu_time_remaining(), 50);

    process.execute_blocking_process(6).unwrap();
    assert_eq!(process.blocking_time_remaining(), 0);
    assert!(process.is_state_changed());

    // Back on the CPU the process finally consumes its CPU time
    process.execute_process(20).unwrap();
    assert_eq!(process.cpu_time_remaining(), 30);
    assert!(!process.is_state_changed());
}

#[test]
fn test_blocking_overshoot_saturates() {
    let ready = expecting(5, SchedulerInterrupt::ProcessReady, 1);
    let mut process = Process::with_requirements(5, 0, 3);
    process.set_parent_queue(&ready);

    process.execute_blocking_process(100).unwrap();

    assert_eq!(process.blocking_time_remaining(), 0);
    assert!(process.is_finished());
}

#[test]
fn test_blocking_slice_keeps_stale_flag() {
    let blocked = expecting(4, SchedulerInterrupt::ProcessBlocked, 1);
    let mut process = Process::with_requirements(4, 50, 10);
    process.set_parent_queue(&blocked);

    process.execute_process(1).unwrap();
    assert!(process.is_state_changed());

    // No reset on entry, and no transition: the flag from the CPU slice survives
    process.execute_blocking_process(1).unwrap();
    assert!(process.is_state_changed());
}

#[test]
fn test_cpu_slice_resets_flag() {
    let ready = expecting(6, SchedulerInterrupt::ProcessReady, 1);
    let mut process = Process::with_requirements(6, 40, 5);
    process.set_parent_queue(&ready);

    process.execute_blocking_process(5).unwrap();
    assert!(process.is_state_changed());

    process.execute_process(10).unwrap();
    assert!(!process.is_state_changed());
    assert_eq!(process.cpu_time_remaining(), 30);
}

#[test]
fn test_reparenting_routes_to_latest_queue() {
    let first = quiet_queue();
    let second = expecting(3, SchedulerInterrupt::ProcessBlocked, 1);
    let mut process = Process::with_requirements(3, 10, 10);

    process.set_parent_queue(&first);
    assert!(is_parent(&process, &first));

    process.set_parent_queue(&second);
    assert!(is_parent(&process, &second));
    assert!(!is_parent(&process, &first));

    process.execute_process(1).unwrap();
}

#[test]
fn test_execute_without_queue_fails() {
    let mut process = Process::with_requirements(10, 50, 10);
    assert!(process.parent_queue().is_none());

    assert_eq!(
        process.execute_process(5),
        Err(ProcessError::NoParentQueue(10))
    );
    assert_eq!(process.cpu_time_remaining(), 50);
}

#[test]
fn test_execute_after_queue_dropped_fails() {
    let queue = quiet_queue();
    let mut process = Process::with_requirements(11, 50, 10);
    process.set_parent_queue(&queue);
    drop(queue);

    assert_eq!(
        process.execute_process(5),
        Err(ProcessError::QueueDropped(11))
    );
}

#[test]
fn test_finished_predicate() {
    assert!(Process::with_requirements(1, 0, 0).is_finished());
    assert!(!Process::with_requirements(1, 1, 0).is_finished());
    assert!(!Process::with_requirements(1, 0, 1).is_finished());
    assert!(!Process::with_requirements(1, 10, 10).is_finished());
}

#[test]
fn test_pid_is_stable() {
    let queue = quiet_queue();
    let mut process = Process::with_requirements(42, 100, 0);
    process.set_parent_queue(&queue);
    process.execute_process(10).unwrap();
    assert_eq!(process.pid(), 42);
}

#[test]
fn test_non_blocking_has_no_blocking_time() {
    let mut rng = StdRng::seed_from_u64(3);
    for pid in 0..100 {
        let process = Process::new(pid, None, false, &mut rng);
        assert_eq!(process.blocking_time_remaining(), 0);
        assert!(process.cpu_time_remaining() <= 1000);
    }
}

#[test]
fn test_blocking_time_is_randomized() {
    let mut rng = StdRng::seed_from_u64(11);
    let drawn: HashSet<u64> = (0..100)
        .map(|pid| Process::new(pid, Some(10), true, &mut rng).blocking_time_remaining())
        .collect();

    assert!(drawn.iter().all(|&t| t <= 100));
    assert!(drawn.len() > 1, "blocking time never varied: {:?}", drawn);
}

#[test]
fn test_cpu_time_is_randomized() {
    let mut rng = StdRng::seed_from_u64(12);
    let drawn: HashSet<u64> = (0..100)
        .map(|pid| Process::new(pid, None, false, &mut rng).cpu_time_remaining())
        .collect();

    assert!(drawn.iter().all(|&t| t <= 1000));
    assert!(drawn.len() > 1);
}
