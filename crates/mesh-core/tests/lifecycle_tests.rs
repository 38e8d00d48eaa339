// Host-side tests for the Animating/Stopped run-state machine.

use mesh_core::{Animator, FrameScheduler, RunState};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Log {
    next: u32,
    pending: Vec<u32>,
    cancelled: Vec<u32>,
}

#[derive(Clone, Default)]
struct FakeScheduler(Rc<RefCell<Log>>);

impl FrameScheduler for FakeScheduler {
    type Handle = u32;

    fn request(&mut self) -> Option<u32> {
        let mut log = self.0.borrow_mut();
        log.next += 1;
        let h = log.next;
        log.pending.push(h);
        Some(h)
    }

    fn cancel(&mut self, handle: u32) {
        let mut log = self.0.borrow_mut();
        log.pending.retain(|&h| h != handle);
        log.cancelled.push(handle);
    }
}

/// Fire the oldest pending callback, returning whether the frame ran.
fn fire(anim: &mut Animator<FakeScheduler>, sched: &FakeScheduler, frames: &mut u32) -> bool {
    {
        let mut log = sched.0.borrow_mut();
        if log.pending.is_empty() {
            return false;
        }
        log.pending.remove(0);
    }
    if !anim.begin_frame() {
        return false;
    }
    *frames += 1;
    anim.end_frame();
    true
}

#[test]
fn start_schedules_and_frames_reschedule() {
    let sched = FakeScheduler::default();
    let mut anim = Animator::new(sched.clone());
    assert_eq!(anim.state(), RunState::Stopped);
    anim.start();
    anim.start();
    assert_eq!(anim.state(), RunState::Animating);
    assert_eq!(sched.0.borrow().pending.len(), 1);

    let mut frames = 0;
    for _ in 0..5 {
        assert!(fire(&mut anim, &sched, &mut frames));
    }
    assert_eq!(frames, 5);
    assert_eq!(sched.0.borrow().pending.len(), 1);
}

#[test]
fn stop_cancels_pending_request() {
    let sched = FakeScheduler::default();
    let mut anim = Animator::new(sched.clone());
    anim.start();
    anim.stop();
    assert_eq!(anim.state(), RunState::Stopped);
    assert!(sched.0.borrow().pending.is_empty());
    assert_eq!(sched.0.borrow().cancelled, vec![1]);

    anim.start();
    assert_eq!(anim.state(), RunState::Animating);
}

#[test]
fn detach_mid_animation_never_runs_another_frame() {
    let sched = FakeScheduler::default();
    let mut anim = Animator::new(sched.clone());
    anim.start();
    let mut frames = 0;
    fire(&mut anim, &sched, &mut frames);
    anim.detach();
    assert!(anim.is_detached());
    assert!(sched.0.borrow().pending.is_empty());

    anim.start();
    assert_eq!(anim.state(), RunState::Stopped);
    assert!(!anim.begin_frame());
    anim.end_frame();
    assert!(sched.0.borrow().pending.is_empty());
    assert_eq!(frames, 1);
}
