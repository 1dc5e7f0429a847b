use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Read the typed image path and run `service.analyze`(...)
    RunAnalysis,
    /// Run `service.centers`(...) and open the Centers screen
    OpenCenters,
    /// Run `service.directions`(...) for the currently selected center
    OpenDirections,
    /// Run `service.profile`(...) and `service.history`(...)
    OpenProfile,
    /// Run `service.leaderboard`(...)
    OpenLeaderboard,
    /// Write the user data export file
    ExportData,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcut; `q` only quits on screens without text input.
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Analyze => match key.code {
            Char(character)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                app.path_input.push(character);
            }
            Backspace => {
                app.path_input.pop();
            }
            Enter => {
                action = Action::RunAnalysis;
            }
            Tab => {
                action = Action::OpenCenters;
            }
            Esc => {
                action = Action::Quit;
            }
            _ => {}
        },

        Screen::Results => match key.code {
            Char('q') => {
                action = Action::Quit;
            }
            Char('c') | Tab => {
                action = Action::OpenCenters;
            }
            Char('p') => {
                action = Action::OpenProfile;
            }
            Char('a') | Esc | Left => {
                app.reset_analysis();
            }
            _ => {}
        },

        Screen::Centers => {
            let visible = app.visible_centers().len();
            match key.code {
                Up => {
                    if app.center_index > 0 {
                        app.center_index -= 1;
                    }
                }
                Down => {
                    if app.center_index + 1 < visible {
                        app.center_index += 1;
                    }
                }
                Tab => {
                    app.kind_filter = app.kind_filter.next();
                    app.center_index = 0;
                }
                Enter | Right => {
                    action = Action::OpenDirections;
                }
                Char(character)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    app.search_input.push(character);
                    app.center_index = 0;
                }
                Backspace => {
                    app.search_input.pop();
                    app.center_index = 0;
                }
                Esc | Left => {
                    app.screen = app.results_or_analyze();
                    app.search_input.clear();
                    app.center_index = 0;
                }
                _ => {}
            }
        }

        Screen::Directions => match key.code {
            Char('q') => {
                action = Action::Quit;
            }
            Esc | Left | Char('b') => {
                app.screen = Screen::Centers;
            }
            _ => {}
        },

        Screen::Profile => match key.code {
            Char('q') => {
                action = Action::Quit;
            }
            Char('l') => {
                action = Action::OpenLeaderboard;
            }
            Char('e') => {
                action = Action::ExportData;
            }
            Char('r') => {
                action = Action::OpenProfile;
            }
            Esc | Left => {
                app.screen = app.results_or_analyze();
            }
            _ => {}
        },

        Screen::Leaderboard => match key.code {
            Char('q') => {
                action = Action::Quit;
            }
            Esc | Left | Char('b') => {
                app.screen = Screen::Profile;
            }
            _ => {}
        },
    }
    action
}
