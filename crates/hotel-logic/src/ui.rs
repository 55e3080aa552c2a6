//! Static UI layout: info panel, side menu and main-menu buttons.
//!
//! Layout is configuration, not game state: it is built once and shared by
//! the click dispatcher and the renderer so what is drawn is what is hit.

use crate::geometry::{PixelRect, Point};

/// What a button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NewGame,
    LoadGame,
    Settings,
    Exit,
    NewRoom,
    ReceiveGuest,
    Cleaning,
    Services,
    Finances,
    Save,
    MainMenu,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Relative to the owning panel.
    pub bounds: PixelRect,
    pub label: &'static str,
    pub action: Action,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub bounds: PixelRect,
    pub title: &'static str,
    pub buttons: Vec<Button>,
}

impl Panel {
    /// Button bounds in screen coordinates.
    pub fn button_rect(&self, button: &Button) -> PixelRect {
        button.bounds.offset(self.bounds.x, self.bounds.y)
    }

    /// First enabled button containing `p`.
    pub fn button_at(&self, p: Point) -> Option<&Button> {
        if !self.bounds.contains(p) {
            return None;
        }
        self.buttons
            .iter()
            .find(|b| b.enabled && self.button_rect(b).contains(p))
    }
}

/// Every panel the game draws.
#[derive(Debug, Clone, PartialEq)]
pub struct UiLayout {
    pub info: Panel,
    pub menu: Panel,
    pub main_menu: Panel,
}

impl UiLayout {
    pub fn new() -> Self {
        Self {
            info: Panel {
                bounds: PixelRect::new(1000.0, 50.0, 250.0, 200.0),
                title: "HOTEL INFORMATION",
                buttons: Vec::new(),
            },
            menu: side_menu(),
            main_menu: main_menu(),
        }
    }
}

impl Default for UiLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn side_menu() -> Panel {
    let entries = [
        ("New Room", Action::NewRoom, true),
        ("Receive Guest", Action::ReceiveGuest, true),
        ("Cleaning", Action::Cleaning, false),
        ("Services", Action::Services, false),
        ("Finances", Action::Finances, false),
        ("Settings", Action::Settings, false),
        ("Save", Action::Save, true),
        ("Main Menu", Action::MainMenu, true),
    ];
    Panel {
        bounds: PixelRect::new(1000.0, 270.0, 250.0, 400.0),
        title: "MENU",
        buttons: entries
            .iter()
            .enumerate()
            .map(|(i, &(label, action, enabled))| Button {
                bounds: PixelRect::new(10.0, 20.0 + 40.0 * i as f32, 230.0, 30.0),
                label,
                action,
                enabled,
            })
            .collect(),
    }
}

// Full-screen panel so button bounds are already absolute.
fn main_menu() -> Panel {
    let entries = [
        ("New Game", Action::NewGame),
        ("Load Game", Action::LoadGame),
        ("Settings", Action::Settings),
        ("Exit", Action::Exit),
    ];
    Panel {
        bounds: PixelRect::new(0.0, 0.0, 1280.0, 720.0),
        title: "HOTEL MANAGER",
        buttons: entries
            .iter()
            .enumerate()
            .map(|(i, &(label, action))| Button {
                bounds: PixelRect::new(540.0, 300.0 + 70.0 * i as f32, 200.0, 50.0),
                label,
                action,
                enabled: true,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_menu_hit() {
        let ui = UiLayout::new();
        let hit = ui.menu.button_at(Point::new(1100.0, 300.0)).map(|b| b.action);
        assert_eq!(hit, Some(Action::NewRoom));
        let hit = ui.menu.button_at(Point::new(1100.0, 345.0)).map(|b| b.action);
        assert_eq!(hit, Some(Action::ReceiveGuest));
        let hit = ui.menu.button_at(Point::new(1100.0, 570.0)).map(|b| b.action);
        assert_eq!(hit, Some(Action::MainMenu));
    }

    #[test]
    fn test_side_menu_gap_and_outside() {
        let ui = UiLayout::new();
        // Between "New Room" (290..320) and "Receive Guest" (330..360).
        assert!(ui.menu.button_at(Point::new(1100.0, 325.0)).is_none());
        assert!(ui.menu.button_at(Point::new(900.0, 300.0)).is_none());
    }

    #[test]
    fn test_disabled_buttons_never_hit() {
        let ui = UiLayout::new();
        // "Cleaning" occupies 370..400.
        assert!(ui.menu.button_at(Point::new(1100.0, 385.0)).is_none());
        let disabled: Vec<_> = ui
            .menu
            .buttons
            .iter()
            .filter(|b| !b.enabled)
            .map(|b| b.action)
            .collect();
        assert_eq!(
            disabled,
            vec![
                Action::Cleaning,
                Action::Services,
                Action::Finances,
                Action::Settings
            ]
        );
    }

    #[test]
    fn test_main_menu_layout() {
        let ui = UiLayout::new();
        let labels: Vec<_> = ui.main_menu.buttons.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["New Game", "Load Game", "Settings", "Exit"]);
        let hit = ui.main_menu.button_at(Point::new(640.0, 535.0)).map(|b| b.action);
        assert_eq!(hit, Some(Action::Exit));
        assert!(ui.main_menu.button_at(Point::new(640.0, 200.0)).is_none());
    }
}
