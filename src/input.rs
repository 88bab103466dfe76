//! Discrete user input: keyboard commands on stdin, plus a physical button
//! when running on the Pi

use crate::config::Config;
use anyhow::Context;
use log::{info, warn};
use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// Flip dim mode on/off
    ToggleDim,
    /// Shut down after the current frame
    Quit,
}

impl InputEvent {
    /// Parse a line typed on stdin. Blank lines are ignored.
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => None,
            "d" | "dim" => Some(Self::ToggleDim),
            "q" | "quit" => Some(Self::Quit),
            other => {
                warn!("Unknown command `{other}`; try `d` (dim) or `q` (quit)");
                None
            }
        }
    }
}

/// Polls every input source without blocking
pub struct Input {
    commands: Receiver<InputEvent>,
    stdin_open: bool,
    button: Option<button::Button>,
}

impl Input {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let (sender, commands) = mpsc::channel();
        // Reading stdin blocks, so it gets its own thread. The thread exits
        // when stdin closes or the receiver is dropped.
        thread::Builder::new()
            .name("stdin".into())
            .spawn(move || {
                for line in io::stdin().lock().lines().map_while(Result::ok) {
                    if let Some(event) = InputEvent::parse(&line) {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                }
            })
            .context("Error spawning stdin thread")?;

        let button = match config.button_pin {
            Some(pin) => Some(
                button::Button::new(pin)
                    .with_context(|| format!("Error opening button {pin}"))?,
            ),
            None => None,
        };

        Ok(Self {
            commands,
            stdin_open: true,
            button,
        })
    }

    /// Get every event since the last poll
    pub fn poll(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while self.stdin_open {
            match self.commands.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("Stdin closed; keyboard commands disabled");
                    self.stdin_open = false;
                }
            }
        }
        if let Some(button) = &mut self.button {
            if button.poll()? {
                events.push(InputEvent::ToggleDim);
            }
        }
        Ok(events)
    }
}

/// Turns a stream of level readings into discrete presses. Only the GPIO
/// button feeds it.
#[cfg_attr(not(target_arch = "arm"), allow(dead_code))]
#[derive(Debug, Default)]
struct Edge {
    was_pressed: bool,
}

#[cfg_attr(not(target_arch = "arm"), allow(dead_code))]
impl Edge {
    /// Feed the latest reading. True only on the reading where the button
    /// goes down, so holding it doesn't repeat.
    fn update(&mut self, pressed: bool) -> bool {
        let press = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        press
    }
}

#[cfg(target_arch = "arm")]
mod button {
    use super::Edge;
    use anyhow::{anyhow, Context};
    use embedded_hal::digital::InputPin;
    use linux_embedded_hal::{sysfs_gpio::Direction, SysfsPin};

    /// Active-low push button on a GPIO pin
    pub struct Button {
        pin: SysfsPin,
        edge: Edge,
    }

    impl Button {
        pub fn new(pin_num: u64) -> anyhow::Result<Self> {
            let pin = SysfsPin::new(pin_num);
            pin.export().context("Error exporting pin")?;
            while !pin.is_exported() {}
            pin.set_direction(Direction::In)
                .context("Error setting pin direction")?;
            Ok(Self {
                pin,
                edge: Edge::default(),
            })
        }

        pub fn poll(&mut self) -> anyhow::Result<bool> {
            // The error type doesn't implement Error so we have to map
            // manually
            let pressed = self
                .pin
                .is_low()
                .map_err(|error| anyhow!("Error reading button: {error:?}"))?;
            Ok(self.edge.update(pressed))
        }
    }
}

/// There are no GPIOs off the Pi
#[cfg(not(target_arch = "arm"))]
mod button {
    use anyhow::bail;

    pub enum Button {}

    impl Button {
        pub fn new(pin_num: u64) -> anyhow::Result<Self> {
            bail!("GPIO button {pin_num} is only supported on ARM builds")
        }

        pub fn poll(&mut self) -> anyhow::Result<bool> {
            match *self {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(InputEvent::parse("d\n"), Some(InputEvent::ToggleDim));
        assert_eq!(InputEvent::parse(" dim "), Some(InputEvent::ToggleDim));
        assert_eq!(InputEvent::parse("q"), Some(InputEvent::Quit));
        assert_eq!(InputEvent::parse(""), None);
        assert_eq!(InputEvent::parse("x"), None);
    }

    #[test]
    fn test_edge() {
        let mut edge = Edge::default();
        let presses: Vec<bool> = [false, true, true, false, true, false]
            .into_iter()
            .map(|pressed| edge.update(pressed))
            .collect();
        assert_eq!(presses, vec![false, true, false, false, true, false]);
    }
}
