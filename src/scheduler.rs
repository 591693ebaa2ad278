use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::engine::LayoutEngine;

pub type FrameTask = Box<dyn FnMut()>;

/// Shared cancellation flag for a scheduled task. Cancelling twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

pub trait FrameScheduler {
    /// Registers `task` to run once per frame until the returned handle is cancelled.
    fn schedule(&mut self, task: FrameTask) -> CancelHandle;
}

/// Scheduler driven explicitly by its owner, one [`ManualScheduler::run_frame`] per frame.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Vec<(CancelHandle, FrameTask)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every live task once and drops cancelled ones. Returns how many tasks ran.
    pub fn run_frame(&mut self) -> usize {
        self.tasks.retain(|(handle, _)| !handle.is_cancelled());

        let mut ran = 0;
        for (handle, task) in &mut self.tasks {
            if handle.is_cancelled() {
                continue;
            }
            task();
            ran += 1;
        }
        ran
    }

    pub fn task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|(handle, _)| !handle.is_cancelled())
            .count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self, task: FrameTask) -> CancelHandle {
        let handle = CancelHandle::default();
        self.tasks.push((handle.clone(), task));
        handle
    }
}

/// Lifecycle of the repeating `frame()` task for one engine. Dropping the loop stops it.
#[derive(Debug, Default)]
pub struct FrameLoop {
    handle: Option<CancelHandle>,
}

impl FrameLoop {
    pub fn start(engine: &Rc<RefCell<LayoutEngine>>, scheduler: &mut impl FrameScheduler) -> Self {
        let engine: Weak<RefCell<LayoutEngine>> = Rc::downgrade(engine);
        let handle = scheduler.schedule(Box::new(move || {
            let Some(engine) = engine.upgrade() else {
                return;
            };
            if let Ok(mut engine) = engine.try_borrow_mut() {
                engine.frame();
            }
        }));
        debug!("layout frame loop started");

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            debug!("layout frame loop stopped");
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
