//! Application state and the lesson host implementation.

use crate::navigation::Navigation;
use crate::store::ProfileRepository;
use chrono::Utc;
use lesson_core::{
    Easing, LessonDescriptor, LessonHost, Profile, Reward, Severity, Theme, ToastSlot,
    TweenScheduler,
};
use std::time::{Duration, Instant};
use tracing::{error, info};

pub const COMPLETION_COUNT_DURATION: Duration = Duration::from_millis(550);
pub const PURCHASE_COUNT_DURATION: Duration = Duration::from_millis(350);
pub const TOAST_SLIDE_DURATION: Duration = Duration::from_millis(220);
pub const PAGE_SLIDE_DURATION: Duration = Duration::from_millis(240);

/// Things the front end animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anim {
    Gems,
    Xp,
    /// 0.0 hidden, 1.0 fully slid in.
    ToastSlide,
    PageSlide,
}

/// Global application state.
pub struct AppState {
    pub profile: Profile,
    pub nav: Navigation,
    pub toast: ToastSlot,
    pub animations: TweenScheduler<Anim>,
    store: Box<dyn ProfileRepository>,
}

impl AppState {
    pub fn new(store: Box<dyn ProfileRepository>) -> Self {
        let profile = store.load();
        let mut animations = TweenScheduler::new();
        animations.set(Anim::Gems, profile.gems as f64);
        animations.set(Anim::Xp, profile.xp as f64);
        animations.set(Anim::ToastSlide, 0.0);
        animations.set(Anim::PageSlide, 1.0);
        Self {
            profile,
            nav: Navigation::default(),
            toast: ToastSlot::new(),
            animations,
            store,
        }
    }

    /// Save the profile. Failures are logged; memory state is kept either way.
    pub fn persist(&self) {
        if let Err(e) = self.store.save(&self.profile) {
            error!(error = %e, "failed to save profile");
        }
    }

    /// Ease the header counters towards the profile's current totals.
    pub fn animate_counters(&mut self, duration: Duration) {
        let now = Instant::now();
        self.animations
            .animate(Anim::Gems, self.profile.gems as f64, duration, Easing::EaseOutQuad, now);
        self.animations
            .animate(Anim::Xp, self.profile.xp as f64, duration, Easing::EaseOutQuad, now);
    }

    /// Restart the page slide-in.
    pub fn slide_page(&mut self) {
        let now = Instant::now();
        self.animations.set(Anim::PageSlide, 0.0);
        self.animations
            .animate(Anim::PageSlide, 1.0, PAGE_SLIDE_DURATION, Easing::EaseOutQuad, now);
    }

    /// Counter value to draw, rounded like the totals it tracks.
    pub fn displayed(&self, anim: Anim) -> u64 {
        self.animations
            .value(anim)
            .map(|v| v.round().max(0.0) as u64)
            .unwrap_or_default()
    }

    /// Advance animations and expire the toast. Returns whether anything
    /// drawn from this state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let was_animating = !self.animations.is_idle();
        self.animations.tick(now);
        let expired = self.toast.tick(now);
        if expired {
            self.animations.set(Anim::ToastSlide, 0.0);
        }
        was_animating || expired
    }

    /// No tween running and no toast waiting to expire.
    pub fn is_idle(&self) -> bool {
        self.animations.is_idle() && self.toast.visible().is_none()
    }
}

impl LessonHost for AppState {
    fn theme(&self) -> Theme {
        Theme::for_name(self.profile.settings.theme)
    }

    fn complete_lesson(&mut self, descriptor: &LessonDescriptor, reward: Reward, message: &str) {
        let now = Utc::now().timestamp();
        let completion = self.profile.record_completion(&descriptor.id, reward, now);
        info!(
            lesson = %descriptor.id,
            gems = reward.gems,
            xp = reward.xp,
            times = completion.times,
            "lesson completed"
        );
        self.persist();
        self.notify(
            &format!("{message}  +{}💎  +{}⭐", reward.gems, reward.xp),
            Severity::Success,
            Duration::from_millis(2600),
        );
        self.animate_counters(COMPLETION_COUNT_DURATION);
        self.nav.return_to_page();
        self.slide_page();
    }

    fn go_back(&mut self) {
        self.nav.return_to_page();
        self.slide_page();
    }

    fn notify(&mut self, message: &str, severity: Severity, duration: Duration) {
        let now = Instant::now();
        self.toast.show(message, severity, duration, now);
        self.animations.set(Anim::ToastSlide, 0.0);
        self.animations
            .animate(Anim::ToastSlide, 1.0, TOAST_SLIDE_DURATION, Easing::EaseOutQuad, now);
    }

    fn has_item(&self, item_id: &str) -> bool {
        self.profile.has_item(item_id)
    }
}
