use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use wordpath_core::Ticker;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One-second scheduler for the terminal loop. Clones share the deadline,
/// so the engine can hold one handle while the loop waits on another.
#[derive(Clone, Debug, Default)]
pub struct IntervalTicker {
    next: Rc<Cell<Option<Instant>>>,
}

impl IntervalTicker {
    /// Blocks until the next tick is due, unless `fast`. Returns `false`
    /// once cancelled.
    pub fn wait(&self, fast: bool) -> bool {
        let Some(due) = self.next.get() else {
            return false;
        };
        if !fast {
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
        }
        // armed before the tick runs so a cancel from inside it sticks
        self.next.set(Some(due + TICK_PERIOD));
        true
    }
}

impl Ticker for IntervalTicker {
    fn schedule(&mut self) {
        self.next.set(Some(Instant::now() + TICK_PERIOD));
    }

    fn cancel(&mut self) {
        self.next.set(None);
    }
}
