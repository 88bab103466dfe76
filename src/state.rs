use crate::input::InputEvent;
use log::info;

/// User-controlled display settings. Only changed by input events, read once
/// per frame.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DisplayToggles {
    /// Show the whole frame at reduced brightness
    pub dim_mode: bool,
}

impl DisplayToggles {
    /// Update toggles for an input event. Events that aren't about display
    /// settings are ignored.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::ToggleDim => {
                self.dim_mode = !self.dim_mode;
                info!("Dim mode {}", if self.dim_mode { "on" } else { "off" });
            }
            InputEvent::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        let mut toggles = DisplayToggles::default();
        assert!(!toggles.dim_mode);
        toggles.apply(InputEvent::ToggleDim);
        assert!(toggles.dim_mode);
        toggles.apply(InputEvent::Quit);
        assert!(toggles.dim_mode);
        toggles.apply(InputEvent::ToggleDim);
        assert_eq!(toggles, DisplayToggles::default());
    }
}
