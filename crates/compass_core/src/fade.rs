use serde::{Deserialize, Serialize};

/// Seconds a full fade takes in each direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeTiming {
    pub fade_in: f32,
    pub fade_out: f32,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            fade_in: 0.6,
            fade_out: 0.3,
        }
    }
}

/// Opacity that eases linearly toward shown or hidden.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    alpha: f32,
    shown: bool,
}

impl Fade {
    pub fn hidden() -> Self {
        Self {
            alpha: 0.0,
            shown: false,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn show(&mut self, shown: bool) {
        self.shown = shown;
    }

    /// Advance by `dt` seconds. A zero duration snaps immediately.
    pub fn step(&mut self, dt: f32, timing: &FadeTiming) {
        let (target, duration) = if self.shown {
            (1.0, timing.fade_in)
        } else {
            (0.0, timing.fade_out)
        };
        if duration <= 0.0 {
            self.alpha = target;
            return;
        }
        let step = dt.max(0.0) / duration;
        self.alpha = if self.alpha < target {
            (self.alpha + step).min(target)
        } else {
            (self.alpha - step).max(target)
        };
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::hidden()
    }
}
