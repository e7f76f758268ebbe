use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WordError {
    #[error("A word needs at least one character")]
    EmptyText,
    #[error("Word size must be a positive number, got {0}")]
    InvalidSize(f32),
    #[error("Word speed must be a non-negative number, got {0}")]
    InvalidSpeed(f32),
    #[error("Word position must be finite")]
    InvalidPosition,
}

/// One target moving from right to left across the play field.
///
/// `text`, `size` and `speed` are fixed at creation, only the position moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    text: String,
    size: f32,
    speed: f32,
    pub x: f32,
    pub y: f32,
}

impl Word {
    pub fn new(
        text: impl Into<String>,
        size: f32,
        speed: f32,
        x: f32,
        y: f32,
    ) -> Result<Self, WordError> {
        let text = text.into();

        if text.is_empty() {
            return Err(WordError::EmptyText);
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(WordError::InvalidSize(size));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(WordError::InvalidSpeed(speed));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(WordError::InvalidPosition);
        }

        Ok(Self {
            text,
            size,
            speed,
            x,
            y,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Number of characters, which is also the width in terminal cells.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Moves the word left by `speed * dt`. `dt` is in seconds.
    pub fn advance(&mut self, dt: f32) {
        self.x -= self.speed * dt;
    }
}
