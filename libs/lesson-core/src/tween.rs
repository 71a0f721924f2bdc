//! Value animation.
//!
//! A [`TweenScheduler`] keeps the active tweens in one list and advances all
//! of them once per host tick. Starting a new tween for a key that is still
//! moving continues from wherever the old one had got to.

use std::time::{Duration, Instant};

/// Easing curve applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutQuad,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// One value moving from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: f64,
    pub end: f64,
    pub started_at: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

/// Shortest allowed duration, so progress is always well defined.
const MIN_DURATION: Duration = Duration::from_millis(10);

impl Tween {
    pub fn new(start: f64, end: f64, started_at: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            end,
            started_at,
            duration: duration.max(MIN_DURATION),
            easing,
        }
    }

    fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return self.end;
        }
        let e = self.easing.apply(self.progress(now));
        self.start + (self.end - self.start) * e
    }
}

/// Active tweens keyed by what they animate.
#[derive(Debug, Clone)]
pub struct TweenScheduler<K> {
    active: Vec<(K, Tween)>,
    values: Vec<(K, f64)>,
}

impl<K> Default for TweenScheduler<K> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> TweenScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value immediately, cancelling any tween on it.
    pub fn set(&mut self, key: K, value: f64) {
        self.active.retain(|(k, _)| *k != key);
        self.store(key, value);
    }

    /// Animate `key` towards `target`, starting from its current value.
    pub fn animate(&mut self, key: K, target: f64, duration: Duration, easing: Easing, now: Instant) {
        let from = self.value_now(key, now).unwrap_or(target);
        self.active.retain(|(k, _)| *k != key);
        self.active
            .push((key, Tween::new(from, target, now, duration, easing)));
    }

    /// Advance every tween to `now`; finished ones are dropped.
    pub fn tick(&mut self, now: Instant) {
        let mut still_running = Vec::with_capacity(self.active.len());
        for (key, tween) in std::mem::take(&mut self.active) {
            self.store(key, tween.value_at(now));
            if !tween.is_finished(now) {
                still_running.push((key, tween));
            }
        }
        self.active = still_running;
    }

    /// Jump every running tween to its end value.
    pub fn finish_all(&mut self) {
        for (key, tween) in std::mem::take(&mut self.active) {
            self.store(key, tween.end);
        }
    }

    /// Value as of the last tick or `set`.
    pub fn value(&self, key: K) -> Option<f64> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn is_animating(&self, key: K) -> bool {
        self.active.iter().any(|(k, _)| *k == key)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    fn value_now(&self, key: K, now: Instant) -> Option<f64> {
        self.active
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tween)| tween.value_at(now))
            .or_else(|| self.value(key))
    }

    fn store(&mut self, key: K, value: f64) {
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((key, value)),
        }
    }
}
