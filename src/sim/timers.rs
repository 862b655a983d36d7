//! Deferred actions keyed by simulation time
//!
//! Replaces "run after delay" callbacks. The state machine polls the queue
//! once per tick; each timer fires at most once.

use serde::{Deserialize, Serialize};

/// What to do when a timer comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Close the panic window opened by panic start number `generation`
    EndPanic { generation: u32 },
    /// Start a new game after the player was hit
    Respawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    due: f64,
    action: TimerAction,
}

/// Pending timers, fired in due order (ties in scheduling order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, action: TimerAction) {
        // Stable insert after every timer due at or before `due`
        let at = self.pending.partition_point(|t| t.due <= due);
        self.pending.insert(at, Timer { due, action });
    }

    /// Remove and return every action due at or before `now`
    pub fn poll(&mut self, now: f64) -> Vec<TimerAction> {
        let ready = self.pending.partition_point(|t| t.due <= now);
        self.pending.drain(..ready).map(|t| t.action).collect()
    }

    /// Due time of the next pending `action`, if any
    pub fn due_time(&self, action: TimerAction) -> Option<f64> {
        self.pending.iter().find(|t| t.action == action).map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut q = TimerQueue::new();
        q.schedule(2.0, TimerAction::Respawn);

        assert!(q.poll(1.999).is_empty());
        assert_eq!(q.poll(2.0), vec![TimerAction::Respawn]);
        assert!(q.poll(5.0).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn test_fires_in_due_order_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(3.0, TimerAction::Respawn);
        q.schedule(1.0, TimerAction::EndPanic { generation: 1 });
        q.schedule(1.0, TimerAction::EndPanic { generation: 2 });

        assert_eq!(
            q.poll(10.0),
            vec![
                TimerAction::EndPanic { generation: 1 },
                TimerAction::EndPanic { generation: 2 },
                TimerAction::Respawn,
            ]
        );
    }

    #[test]
    fn test_due_time_lookup() {
        let mut q = TimerQueue::new();
        q.schedule(4.5, TimerAction::Respawn);
        assert_eq!(q.due_time(TimerAction::Respawn), Some(4.5));
        assert_eq!(q.due_time(TimerAction::EndPanic { generation: 0 }), None);
        assert_eq!(q.len(), 1);
    }
}
