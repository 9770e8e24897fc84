use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.should_quit = true;
            }
        }
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Move(direction) => app.move_cursor(direction),
        InputAction::Flip => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.flip_cursor();
            }
        }
        InputAction::Restart => app.restart(),
    }
}
