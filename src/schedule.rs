//! Two periodic poll tasks driven by one fine-grained browser tick.
//!
//! The status task settles through a short debounce window (a re-trigger
//! before the window elapses cancels the pending run and reschedules it);
//! the log task fires plainly on each interval. Both are fire-and-forget:
//! the scheduler never waits on in-flight fetches, because every completion
//! performs a full-state overwrite and overlap is therefore idempotent.

/// Fixed polling interval for both tasks.
pub const POLL_INTERVAL_MS: f64 = 1000.0;
/// Settle delay applied to every status trigger.
pub const STATUS_DEBOUNCE_MS: f64 = 100.0;

/// What the driver should do on this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickActions {
    pub run_status: bool,
    pub run_logs: bool,
}

#[derive(Debug)]
pub struct PollScheduler {
    interval_ms: f64,
    debounce_ms: f64,
    running: bool,
    next_status_trigger_ms: f64,
    next_log_tick_ms: f64,
    status_due_ms: Option<f64>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::with_timing(POLL_INTERVAL_MS, STATUS_DEBOUNCE_MS)
    }

    pub fn with_timing(interval_ms: f64, debounce_ms: f64) -> Self {
        Self {
            interval_ms,
            debounce_ms,
            running: false,
            next_status_trigger_ms: 0.0,
            next_log_tick_ms: 0.0,
            status_due_ms: None,
        }
    }

    /// Arms both tasks. The log task runs right away so first paint doesn't
    /// wait a full interval; the immediate status invocation still settles
    /// through the debounce window.
    pub fn start(&mut self, now_ms: f64) -> TickActions {
        self.running = true;
        self.next_status_trigger_ms = now_ms + self.interval_ms;
        self.next_log_tick_ms = now_ms + self.interval_ms;
        self.status_due_ms = Some(now_ms + self.debounce_ms);
        TickActions {
            run_status: false,
            run_logs: true,
        }
    }

    /// The only cancellation path (page teardown).
    pub fn stop(&mut self) {
        self.running = false;
        self.status_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Asks for an out-of-band status refresh (used right after a one-shot
    /// action completes). Goes through the same debounce, so bursts collapse
    /// into a single execution.
    pub fn request_status(&mut self, now_ms: f64) {
        if self.running {
            self.status_due_ms = Some(now_ms + self.debounce_ms);
        }
    }

    pub fn advance(&mut self, now_ms: f64) -> TickActions {
        let mut out = TickActions::default();
        if !self.running {
            return out;
        }

        if now_ms >= self.next_log_tick_ms {
            out.run_logs = true;
            // Collapse missed wall time instead of bursting.
            while self.next_log_tick_ms <= now_ms {
                self.next_log_tick_ms += self.interval_ms;
            }
        }

        if now_ms >= self.next_status_trigger_ms {
            // Interval trigger: cancel any pending run and reschedule.
            self.status_due_ms = Some(now_ms + self.debounce_ms);
            while self.next_status_trigger_ms <= now_ms {
                self.next_status_trigger_ms += self.interval_ms;
            }
        }

        if let Some(due) = self.status_due_ms {
            if now_ms >= due {
                out.run_status = true;
                self.status_due_ms = None;
            }
        }

        out
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the scheduler in fixed steps, collecting fire times.
    fn run(sched: &mut PollScheduler, from_ms: f64, to_ms: f64, step_ms: f64) -> (Vec<f64>, Vec<f64>) {
        let mut status = Vec::new();
        let mut logs = Vec::new();
        let mut t = from_ms;
        while t <= to_ms {
            let actions = sched.advance(t);
            if actions.run_status {
                status.push(t);
            }
            if actions.run_logs {
                logs.push(t);
            }
            t += step_ms;
        }
        (status, logs)
    }

    #[test]
    fn start_runs_logs_immediately_and_status_after_the_settle_delay() {
        let mut sched = PollScheduler::new();
        let first = sched.start(0.0);
        assert!(first.run_logs);
        assert!(!first.run_status);

        let (status, _) = run(&mut sched, 10.0, 200.0, 10.0);
        assert_eq!(status, vec![100.0]);
    }

    #[test]
    fn steady_state_is_once_per_interval_each() {
        let mut sched = PollScheduler::new();
        sched.start(0.0);

        let (status, logs) = run(&mut sched, 10.0, 3500.0, 10.0);
        assert_eq!(status, vec![100.0, 1100.0, 2100.0, 3100.0]);
        assert_eq!(logs, vec![1000.0, 2000.0, 3000.0]);
    }

    #[test]
    fn request_bursts_collapse_into_one_execution() {
        let mut sched = PollScheduler::new();
        sched.start(0.0);
        // Drain the startup settle first.
        let (status, _) = run(&mut sched, 10.0, 150.0, 10.0);
        assert_eq!(status, vec![100.0]);

        sched.request_status(200.0);
        assert_eq!(sched.advance(230.0), TickActions::default());
        sched.request_status(230.0);
        sched.request_status(260.0);

        let (status, _) = run(&mut sched, 270.0, 500.0, 10.0);
        assert_eq!(status, vec![360.0]);
    }

    #[test]
    fn overdue_ticks_do_not_burst() {
        let mut sched = PollScheduler::new();
        sched.start(0.0);
        run(&mut sched, 10.0, 150.0, 10.0);

        // The tab was throttled for 5 intervals; one run each, not five.
        let actions = sched.advance(5000.0);
        assert!(actions.run_logs);
        let (status, logs) = run(&mut sched, 5010.0, 5990.0, 10.0);
        assert_eq!(status, vec![5100.0]);
        assert!(logs.is_empty());
    }

    #[test]
    fn stopped_scheduler_fires_nothing() {
        let mut sched = PollScheduler::new();
        sched.start(0.0);
        sched.stop();
        assert!(!sched.is_running());
        let (status, logs) = run(&mut sched, 0.0, 5000.0, 50.0);
        assert!(status.is_empty());
        assert!(logs.is_empty());

        sched.request_status(6000.0);
        assert_eq!(sched.advance(7000.0), TickActions::default());
    }
}
