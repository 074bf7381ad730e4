// Copyright 2025 The Grim Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

/// Role of keyboard timer, only one timer per role can be scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerRole {
    /// Switch backspace into auto-delete mode.
    BackspaceEscalate,
    /// Repeat backspace in auto-delete mode.
    BackspaceRepeat,
    /// Double-tap window of shift key.
    ShiftToggle,
    /// Long-press delay before key menu is shown.
    KeyMenuOpen,
}

impl TimerRole {
    pub const ALL: [TimerRole; 4] = [
        TimerRole::BackspaceEscalate,
        TimerRole::BackspaceRepeat,
        TimerRole::ShiftToggle,
        TimerRole::KeyMenuOpen,
    ];
}

/// Scheduled timer.
#[derive(Clone, Copy, Debug)]
struct Timer {
    /// Time of next firing.
    deadline: Instant,
    /// Repeat interval, `None` for one-shot timer.
    interval: Option<Duration>,
    /// Identifier of schedule call which created the timer.
    id: u64,
}

/// Timers keyed by role, fired from the event loop with [`TimerService::pop_due`].
#[derive(Default)]
pub struct TimerService {
    timers: HashMap<TimerRole, Timer>,
    /// Identifier of last scheduled timer.
    last_id: u64,
    /// Count of live timers replaced by scheduling the same role.
    replaced: u64,
}

impl TimerService {
    /// Minimal interval of repeating timer.
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Schedule one-shot timer, previous timer of the role is cancelled.
    pub fn schedule_once(&mut self, role: TimerRole, delay: Duration, now: Instant) {
        trace!("schedule {:?} in {:?}", role, delay);
        self.insert(role, now + delay, None);
    }

    /// Schedule repeating timer, previous timer of the role is cancelled.
    pub fn schedule_repeating(&mut self, role: TimerRole, interval: Duration, now: Instant) {
        let interval = if interval < Self::MIN_INTERVAL {
            warn!("{:?} interval {:?} is too small, using {:?}", role, interval, Self::MIN_INTERVAL);
            Self::MIN_INTERVAL
        } else {
            interval
        };
        trace!("schedule {:?} every {:?}", role, interval);
        self.insert(role, now + interval, Some(interval));
    }

    fn insert(&mut self, role: TimerRole, deadline: Instant, interval: Option<Duration>) {
        self.last_id += 1;
        let timer = Timer { deadline, interval, id: self.last_id };
        if self.timers.insert(role, timer).is_some() {
            debug!("{:?} replaced before firing", role);
            self.replaced += 1;
        }
    }

    /// Cancel timer of provided role.
    pub fn cancel(&mut self, role: TimerRole) {
        if self.timers.remove(&role).is_some() {
            trace!("cancel {:?}", role);
        }
    }

    /// Cancel timers of provided roles.
    pub fn cancel_all(&mut self, roles: &[TimerRole]) {
        for role in roles {
            self.cancel(*role);
        }
    }

    /// Check if timer of provided role is scheduled.
    pub fn is_scheduled(&self, role: TimerRole) -> bool {
        self.timers.contains_key(&role)
    }

    /// Get identifier of scheduled timer, every schedule call gets a new one.
    pub fn timer_id(&self, role: TimerRole) -> Option<u64> {
        self.timers.get(&role).map(|t| t.id)
    }

    /// Get count of live timers which were replaced without cancellation.
    pub fn replaced(&self) -> u64 {
        self.replaced
    }

    /// Get scheduled roles.
    pub fn scheduled(&self) -> Vec<TimerRole> {
        self.timers.keys().cloned().collect()
    }

    /// Get earliest deadline of scheduled timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Take earliest timer which is due at provided time, returning its role and deadline.
    /// One-shot timer is removed, repeating timer is re-armed from its deadline.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerRole, Instant)> {
        let (role, timer) = self.timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| t.deadline)
            .map(|(r, t)| (*r, *t))?;
        match timer.interval {
            Some(interval) => {
                if let Some(t) = self.timers.get_mut(&role) {
                    t.deadline = timer.deadline + interval;
                }
            }
            None => {
                self.timers.remove(&role);
            }
        }
        Some((role, timer.deadline))
    }
}
