//! Transient, independently-timed user notices.
//!
//! Each notice lives through its own animation lifecycle: visible for the
//! hold window, then a short leave phase, then removed. Timers are per-entry
//! (two notices pushed in the same frame age independently) and there is no
//! dedup: pushing the same message twice stacks two entries.

/// How long a notice stays fully visible.
pub const NOTICE_HOLD_MS: f64 = 3000.0;
/// Duration of the leave animation before the entry is dropped.
pub const NOTICE_LEAVE_MS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub level: NoticeLevel,
    pub phase: NoticePhase,
    shown_at_ms: f64,
}

impl Notice {
    /// CSS class for the overlay entry; the leave phase appends a modifier
    /// the stylesheet animates out.
    pub fn css_class(&self) -> &'static str {
        match (self.level, self.phase) {
            (NoticeLevel::Info, NoticePhase::Visible) => "notice info",
            (NoticeLevel::Success, NoticePhase::Visible) => "notice success",
            (NoticeLevel::Error, NoticePhase::Visible) => "notice error",
            (NoticeLevel::Info, NoticePhase::Leaving) => "notice info leaving",
            (NoticeLevel::Success, NoticePhase::Leaving) => "notice success leaving",
            (NoticeLevel::Error, NoticePhase::Leaving) => "notice error leaving",
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeStack {
    next_id: u64,
    items: Vec<Notice>,
}

impl NoticeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, level: NoticeLevel, now_ms: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice {
            id,
            message: message.into(),
            level,
            phase: NoticePhase::Visible,
            shown_at_ms: now_ms,
        });
        id
    }

    /// Advances every per-entry timer to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        for notice in &mut self.items {
            if notice.phase == NoticePhase::Visible
                && now_ms - notice.shown_at_ms >= NOTICE_HOLD_MS
            {
                notice.phase = NoticePhase::Leaving;
            }
        }
        self.items
            .retain(|n| now_ms - n.shown_at_ms < NOTICE_HOLD_MS + NOTICE_LEAVE_MS);
    }

    pub fn visible(&self) -> &[Notice] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_runs_through_its_lifecycle() {
        let mut stack = NoticeStack::new();
        stack.push("connected", NoticeLevel::Success, 1000.0);

        stack.tick(1000.0 + NOTICE_HOLD_MS - 1.0);
        assert_eq!(stack.visible()[0].phase, NoticePhase::Visible);

        stack.tick(1000.0 + NOTICE_HOLD_MS);
        assert_eq!(stack.visible()[0].phase, NoticePhase::Leaving);

        stack.tick(1000.0 + NOTICE_HOLD_MS + NOTICE_LEAVE_MS - 1.0);
        assert_eq!(stack.len(), 1);

        stack.tick(1000.0 + NOTICE_HOLD_MS + NOTICE_LEAVE_MS);
        assert!(stack.is_empty());
    }

    #[test]
    fn identical_messages_stack_independently() {
        let mut stack = NoticeStack::new();
        let a = stack.push("saved", NoticeLevel::Info, 0.0);
        let b = stack.push("saved", NoticeLevel::Info, 500.0);
        assert_ne!(a, b);

        // The older entry is gone while the younger one is still animating.
        stack.tick(500.0 + NOTICE_HOLD_MS + 100.0);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.visible()[0].id, b);
        assert_eq!(stack.visible()[0].phase, NoticePhase::Leaving);
    }

    #[test]
    fn tick_on_empty_stack_is_a_no_op() {
        let mut stack = NoticeStack::new();
        stack.tick(10_000.0);
        assert!(stack.is_empty());
    }
}
