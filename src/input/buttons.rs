//! Discrete action buttons and edge detection.

use serde::{Deserialize, Serialize};

/// Discrete inputs bound in the action layer.
///
/// Controller bindings (zoom, grab, ...) and the operator keyboard keys
/// (save log, export, quit) are reported the same way: as held levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Zoom,
    AddPatch,
    Erase,
    Grab,
    ToggleGrid,
    ToggleMirror,
    SwitchSystem,
    /// "Go to next step" / confirm button
    StudyNext,
    SaveStudyLog,
    ExportSketch,
    Quit,
}

impl Button {
    pub const ALL: [Button; 11] = [
        Button::Zoom,
        Button::AddPatch,
        Button::Erase,
        Button::Grab,
        Button::ToggleGrid,
        Button::ToggleMirror,
        Button::SwitchSystem,
        Button::StudyNext,
        Button::SaveStudyLog,
        Button::ExportSketch,
        Button::Quit,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of buttons, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Button>", into = "Vec<Button>")]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn with(mut self, button: Button) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = Self::empty();
        for button in iter {
            set.insert(button);
        }
        set
    }
}

impl From<Vec<Button>> for ButtonSet {
    fn from(buttons: Vec<Button>) -> Self {
        buttons.into_iter().collect()
    }
}

impl From<ButtonSet> for Vec<Button> {
    fn from(set: ButtonSet) -> Self {
        set.iter().collect()
    }
}

/// Converts held levels into press/release edges.
///
/// Must be updated exactly once per tick, including ticks where nothing
/// reads the edges, so that a press held across a state change is only
/// ever reported once.
#[derive(Debug, Clone, Default)]
pub struct ButtonEdges {
    held: ButtonSet,
    pressed: ButtonSet,
    released: ButtonSet,
}

impl ButtonEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, held: ButtonSet) {
        let previous = self.held;
        self.pressed = ButtonSet(held.0 & !previous.0);
        self.released = ButtonSet(previous.0 & !held.0);
        self.held = held;
    }

    /// Button went down this tick.
    pub fn pressed(&self, button: Button) -> bool {
        self.pressed.contains(button)
    }

    /// Button went up this tick.
    pub fn released(&self, button: Button) -> bool {
        self.released.contains(button)
    }

    pub fn held(&self, button: Button) -> bool {
        self.held.contains(button)
    }
}
