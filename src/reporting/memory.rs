use std::cell::RefCell;
use std::rc::Rc;

use crate::core::events::{Event, Reporter};

/// Keeps every event in memory. Clones share the same log, so a test can hand
/// one clone to a `Harness` and inspect the events through another.
///
/// 将所有事件保存在内存中。克隆体共享同一份日志，因此测试可以把一个克隆交给
/// `Harness`，再通过另一个克隆检查事件。
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Reporter for EventLog {
    fn report(&mut self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}
