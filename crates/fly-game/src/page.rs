//! The single HTML page hosting the canvas game.

use askama::Template;
use thiserror::Error;

/// Tunables baked into the rendered page.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSettings {
    /// Page title.
    pub title: String,
    /// Downward acceleration per frame, in pixels.
    pub gravity: f64,
    /// Velocity applied on tap; negative moves the ball up.
    pub jump_velocity: f64,
    /// Ball radius in pixels.
    pub ball_radius: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            title: "Fly Game".to_string(),
            gravity: 0.5,
            jump_velocity: -10.0,
            ball_radius: 20,
        }
    }
}

/// Failure to render the game page.
#[derive(Debug, Error)]
#[error("failed to render game page: {0}")]
pub struct PageError(#[from] askama::Error);

/// Askama view model for the game page.
#[derive(Template)]
#[template(path = "fly.html")]
struct FlyGamePageTemplate<'a> {
    title: &'a str,
    gravity: f64,
    jump_velocity: f64,
    ball_radius: u32,
}

/// Renders the game page for `settings`.
///
/// # Errors
/// Returns an error if Askama template rendering fails.
pub fn render_page(settings: &GameSettings) -> Result<String, PageError> {
    let template = FlyGamePageTemplate {
        title: &settings.title,
        gravity: settings.gravity,
        jump_velocity: settings.jump_velocity,
        ball_radius: settings.ball_radius,
    };

    Ok(template.render()?)
}
