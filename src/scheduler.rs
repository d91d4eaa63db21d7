use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) i64);

impl TimerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleUpdate {
    pub property: String,
    pub value: String,
}

impl StyleUpdate {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// Inline style changes to apply to `target` once `delay_ms` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTask {
    pub target: NodeId,
    pub delay_ms: i64,
    pub updates: Vec<StyleUpdate>,
}

/// Accepts deferred work. Scheduled work is fire-and-forget from the
/// scheduling side.
pub trait Scheduler {
    fn schedule(&mut self, task: RevealTask) -> TimerId;
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: TimerId,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) task: RevealTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub target: NodeId,
    pub due_at: i64,
    pub order: i64,
}

/// Virtual clock plus a queue of deferred tasks ordered by
/// `(due_at, insertion order)`. Time only moves when the owner says so.
#[derive(Debug)]
pub struct VirtualScheduler {
    now_ms: i64,
    queue: Vec<ScheduledTask>,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            queue: Vec::new(),
            next_timer_id: 1,
            next_task_order: 0,
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                target: task.task.target,
                due_at: task.due_at,
                order: task.order,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|task| task.id != id);
        self.queue.len() != before
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.queue.len();
        self.queue.clear();
        cleared
    }

    pub(crate) fn set_now(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    /// Due time of the earliest task at or before `due_limit` (any task when
    /// `None`).
    pub fn next_due(&self, due_limit: Option<i64>) -> Option<i64> {
        self.peek_next(due_limit).map(|task| task.due_at)
    }

    pub(crate) fn peek_next(&self, due_limit: Option<i64>) -> Option<&ScheduledTask> {
        self.next_task_index(due_limit)
            .and_then(|idx| self.queue.get(idx))
    }

    /// Removes the earliest task due at or before `due_limit` (any task when
    /// `None`).
    pub(crate) fn take_next(&mut self, due_limit: Option<i64>) -> Option<ScheduledTask> {
        let idx = self.next_task_index(due_limit)?;
        Some(self.queue.remove(idx))
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, task: RevealTask) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        let due_at = self.now_ms.saturating_add(task.delay_ms.max(0));
        self.queue.push(ScheduledTask {
            id,
            due_at,
            order,
            task,
        });
        id
    }
}
