use super::*;
use crate::scheduler::ScheduledTask;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending_timers()
    }

    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let existed = self.scheduler.clear_timer(id);
        self.trace_timer_line(format!("[timer] clear id={} existed={existed}", id.get()));
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.clear_all_timers();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::InvalidConfig(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms();
        self.scheduler.set_now(from.saturating_add(delta_ms));
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms()), false)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
            self.scheduler.now_ms()
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.scheduler.now_ms();
        if target_ms < from {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={from})"
            )));
        }
        self.scheduler.set_now(target_ms);
        let ran = self.run_timer_queue(Some(target_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs every pending timer in due order, moving the clock forward to
    /// each one.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms();
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.scheduler.now_ms()
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(task) = self.scheduler.take_next(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        if task.due_at > self.scheduler.now_ms() {
            self.scheduler.set_now(task.due_at);
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms()), false)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={ran}",
            self.scheduler.now_ms()
        ));
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while self.scheduler.peek_next(due_limit).is_some() {
            steps += 1;
            if steps > self.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let Some(task) = self.scheduler.take_next(due_limit) else {
                break;
            };
            if advance_clock && task.due_at > self.scheduler.now_ms() {
                self.scheduler.set_now(task.due_at);
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        let next_task_desc = self
            .scheduler
            .peek_next(due_limit)
            .map(|task| {
                format!(
                    "id={},due_at={},order={},target={}",
                    task.id.get(),
                    task.due_at,
                    task.order,
                    self.node_label(task.task.target)
                )
            })
            .unwrap_or_else(|| "none".into());
        Error::TimerStepLimit(format!(
            "timer queue exceeded max steps: limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={next_task_desc}",
            self.timer_step_limit,
            self.scheduler.now_ms(),
            self.scheduler.len(),
        ))
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        let now_ms = self.scheduler.now_ms();
        let target = task.task.target;
        self.trace_timer_line(format!(
            "[timer] run id={} target={} due_at={} now_ms={now_ms}",
            task.id.get(),
            self.node_label(target),
            task.due_at
        ));
        if self.document.dom.element(target).is_none() {
            return Ok(());
        }
        let from = self.sample_static_state(target)?;
        for update in &task.task.updates {
            self.document
                .dom
                .style_set(target, &update.property, &update.value)?;
        }
        self.reveals.insert(
            target,
            RevealRecord {
                fired_at: now_ms,
                from,
            },
        );
        Ok(())
    }

    /// Opacity and vertical offset currently written in `node`'s inline
    /// style; unset values read as fully visible and unshifted.
    fn sample_static_state(&self, node: NodeId) -> Result<VisualState> {
        let dom = &self.document.dom;
        let opacity = dom
            .style_get(node, "opacity")?
            .trim()
            .parse::<f32>()
            .map_or(1.0, |value| value.clamp(0.0, 1.0));
        let offset_px =
            transition::parse_translate_y(&dom.style_get(node, "transform")?).unwrap_or(0.0);
        Ok(VisualState { opacity, offset_px })
    }

    /// Opacity and vertical offset of the element at the current virtual
    /// time, sampling any running reveal transition.
    pub fn card_visual_state(&self, selector: &str) -> Result<VisualState> {
        let target = self.select_one(selector)?;
        let settled = self.sample_static_state(target)?;
        let Some(record) = self.reveals.get(&target) else {
            return Ok(settled);
        };
        let elapsed = self.scheduler.now_ms().saturating_sub(record.fired_at);
        let transitions =
            transition::parse_transition_list(&self.document.dom.style_get(target, "transition")?);
        let progress_for = |property: &str| {
            transitions
                .iter()
                .rev()
                .find(|spec| spec.property == property || spec.property == "all")
                .map_or(1.0, |spec| spec.progress_at(elapsed))
        };
        Ok(VisualState {
            opacity: transition::interpolate(
                record.from.opacity,
                settled.opacity,
                progress_for("opacity"),
            ),
            offset_px: transition::interpolate(
                record.from.offset_px,
                settled.offset_px,
                progress_for("transform"),
            ),
        })
    }
}
