use crate::app::state::App;
use crossterm::event::KeyCode;

pub async fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('r') => {
            tracing::info!(path = %app.config.data_path.display(), "reloading snapshot");
            app.reload().await;
        }
        KeyCode::Char('p' | ' ') => app.toggle_ticker(),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        match key {
            KeyCode::Esc => app.show_help = false,
            KeyCode::Char('q') => app.running = false,
            _ => {}
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use trendboard_core::animation::AnimationMode;

    fn app() -> App {
        App::new(AppConfig::with_data_path("/nonexistent/trends.json"))
    }

    #[tokio::test]
    async fn quit_keys_stop_the_app() {
        for key in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            handle_input(&mut app, key).await;
            assert!(!app.running);
        }
    }

    #[tokio::test]
    async fn space_and_p_toggle_the_ticker() {
        let mut app = app();

        handle_input(&mut app, KeyCode::Char(' ')).await;
        assert_eq!(app.ticker_mode, AnimationMode::Paused);

        handle_input(&mut app, KeyCode::Char('p')).await;
        assert_eq!(app.ticker_mode, AnimationMode::Running);
    }

    #[tokio::test]
    async fn escape_closes_help_before_quitting() {
        let mut app = app();

        handle_input(&mut app, KeyCode::Char('?')).await;
        assert!(app.show_help);

        handle_input(&mut app, KeyCode::Esc).await;
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[tokio::test]
    async fn help_swallows_other_keys() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('?')).await;

        handle_input(&mut app, KeyCode::Char('p')).await;

        assert_eq!(app.ticker_mode, AnimationMode::Running);
    }
}
