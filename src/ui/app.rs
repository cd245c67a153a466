//! Main UI application
//!
//! Renders the dungeon through a camera that follows the player, applying
//! the fog-of-war alpha as color dimming, and translates key presses into
//! game actions.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::game::Game;
use crate::world::{graphics, Bounds, Position, TileType};

/// Fully lit colors per tile kind
const FLOOR_FG: (u8, u8, u8) = (80, 80, 80);
const WALL_FG: (u8, u8, u8) = (130, 110, 90);
const CORRIDOR_WALL_FG: (u8, u8, u8) = (90, 95, 110);
const DOOR_FG: (u8, u8, u8) = (139, 90, 43);
const STAIRS_FG: (u8, u8, u8) = (200, 200, 200);
const PLAYER_FG: (u8, u8, u8) = (220, 200, 130);

/// Main UI application
pub struct App {
    /// Grid-space window rendered last frame, fed back into the fog blend
    viewport: Bounds,
    /// Fog overlay toggle (the F key); fog state still advances underneath
    show_fog: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            viewport: Bounds::new(0, 0, 0, 0),
            show_fog: true,
        }
    }

    /// The camera window in grid space from the last render
    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    /// Handle a key press. Returns true when the game should quit.
    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        let step = match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some((-1, 0)),
            KeyCode::Right | KeyCode::Char('l') => Some((1, 0)),
            KeyCode::Up | KeyCode::Char('k') => Some((0, -1)),
            KeyCode::Down | KeyCode::Char('j') => Some((0, 1)),
            KeyCode::Char('y') => Some((-1, -1)),
            KeyCode::Char('u') => Some((1, -1)),
            KeyCode::Char('b') => Some((-1, 1)),
            KeyCode::Char('n') => Some((1, 1)),
            _ => None,
        };

        if let Some((dx, dy)) = step {
            game.try_move(dx, dy)?;
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('F') | KeyCode::Char('f') => self.show_fog = !self.show_fog,
            KeyCode::Char('q') | KeyCode::Esc => {
                game.quit();
                return Ok(true);
            }
            _ => {}
        }

        Ok(false)
    }

    /// Render the map view and the status line
    pub fn render(&mut self, frame: &mut Frame, game: &Game) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        self.render_map(frame, chunks[0], game);
        self.render_status(frame, chunks[1], game);
    }

    fn render_map(&mut self, frame: &mut Frame, area: Rect, game: &Game) {
        let map = game.map();
        let player = game.player_pos();

        let vw = area.width as i32;
        let vh = area.height as i32;
        let cam_x = (player.x - vw / 2).clamp(0, (map.width - vw).max(0));
        let cam_y = (player.y - vh / 2).clamp(0, (map.height - vh).max(0));
        self.viewport = Bounds::new(cam_x, cam_y, vw, vh);

        let fogged = game.fog_enabled() && self.show_fog;
        let buf = frame.buffer_mut();

        for row in 0..area.height {
            for col in 0..area.width {
                let x = cam_x + col as i32;
                let y = cam_y + row as i32;
                let Some(tile) = map.tile_at(x, y) else {
                    continue;
                };

                let (glyph, fg) = match tile.tile_type {
                    TileType::Wall => {
                        let fg = if tile.corridor { CORRIDOR_WALL_FG } else { WALL_FG };
                        (graphics::glyph(map.sprite_index(x, y)), fg)
                    }
                    TileType::Door => (graphics::glyph(map.sprite_index(x, y)), DOOR_FG),
                    TileType::None => ('.', FLOOR_FG),
                };

                let pos = Position::new(x, y);
                let (glyph, fg) = if pos == player {
                    ('@', PLAYER_FG)
                } else if pos == game.stairs_pos() {
                    ('>', STAIRS_FG)
                } else {
                    (glyph, fg)
                };

                let fg = if fogged && pos != player {
                    dim(fg, tile.alpha)
                } else {
                    fg
                };

                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_char(glyph);
                cell.set_style(Style::default().fg(Color::Rgb(fg.0, fg.1, fg.2)));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let pos = game.player_pos();
        let mut spans = vec![
            Span::styled(
                format!(" depth {} ", game.level()),
                Style::default().fg(Color::Rgb(200, 180, 120)),
            ),
            Span::raw(format!("({}, {}) ", pos.x, pos.y)),
        ];
        if let Some(message) = game.latest_message() {
            spans.push(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Rgb(150, 150, 150)),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale a color toward black by the fog alpha (1.0 = fully dark)
fn dim(fg: (u8, u8, u8), alpha: f32) -> (u8, u8, u8) {
    let k = (1.0 - alpha).clamp(0.0, 1.0);
    (
        (fg.0 as f32 * k) as u8,
        (fg.1 as f32 * k) as u8,
        (fg.2 as f32 * k) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_endpoints() {
        assert_eq!(dim((100, 200, 50), 1.0), (0, 0, 0));
        assert_eq!(dim((100, 200, 50), 0.0), (100, 200, 50));
    }
}
