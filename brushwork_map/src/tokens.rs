use glam::Vec3;

use crate::{error::PlaneError, parsers::tokenize};

/// Cursor over the tokens of a single line.
pub(crate) struct Tokens<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            tokens: tokenize(line),
            position: 0,
        }
    }

    /// Fails early if the line can't possibly contain `count` fields.
    pub fn require(&self, count: usize) -> Result<(), PlaneError> {
        if self.tokens.len() < count {
            return Err(PlaneError::TooFewTokens {
                expected: count,
                found: self.tokens.len(),
            });
        }
        Ok(())
    }

    pub fn word(&mut self) -> Result<&'a str, PlaneError> {
        let token = self
            .tokens
            .get(self.position)
            .copied()
            .ok_or(PlaneError::TooFewTokens {
                expected: self.position + 1,
                found: self.tokens.len(),
            })?;
        self.position += 1;
        Ok(token)
    }

    pub fn expect(&mut self, expected: &'static str) -> Result<(), PlaneError> {
        let index = self.position;
        let token = self.word()?;
        if token != expected {
            return Err(PlaneError::UnexpectedToken {
                index,
                expected,
                found: token.to_owned(),
            });
        }
        Ok(())
    }

    pub fn number(&mut self, field: &'static str) -> Result<f32, PlaneError> {
        let index = self.position;
        let token = self.word()?;
        let invalid = || PlaneError::InvalidNumber {
            index,
            field,
            found: token.to_owned(),
        };

        let value: f32 = token.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(value)
    }

    /// A parenthesized `( x y z )` point.
    pub fn point(&mut self, field: &'static str) -> Result<Vec3, PlaneError> {
        self.expect("(")?;
        let point = Vec3::new(self.number(field)?, self.number(field)?, self.number(field)?);
        self.expect(")")?;
        Ok(point)
    }
}
