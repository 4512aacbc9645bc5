//! Card values: colors, faces, and identified card instances.
//!
//! A `Card` is an immutable value except for its `color`, which a
//! wild-family card picks up when played and loses again when it is
//! recycled into the draw deck.

use serde::{Deserialize, Serialize};

/// Globally unique card identifier, assigned once at deck construction.
///
/// Identifiers are never reused, even across reshuffles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One of the four suit colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Face value of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Numeral 0-9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Face {
    /// Wild-family faces have no intrinsic color.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Face::Wild | Face::WildDrawFour)
    }

    /// Faces that add to the draw stack and may be stacked on each other.
    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(self, Face::DrawTwo | Face::WildDrawFour)
    }

    /// Cards added to the draw stack when this face is played.
    #[must_use]
    pub const fn draw_penalty(self) -> u32 {
        match self {
            Face::DrawTwo => 2,
            Face::WildDrawFour => 4,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Number(n) => write!(f, "{n}"),
            Face::Skip => f.write_str("skip"),
            Face::Reverse => f.write_str("reverse"),
            Face::DrawTwo => f.write_str("draw two"),
            Face::Wild => f.write_str("wild"),
            Face::WildDrawFour => f.write_str("wild draw four"),
        }
    }
}

/// A single physical card.
///
/// `color` is `None` for a wild-family card that is not currently bound to
/// a chosen color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Option<Color>,
    pub face: Face,
}

impl Card {
    /// Create a colored card.
    #[must_use]
    pub const fn colored(id: CardId, color: Color, face: Face) -> Self {
        Self {
            id,
            color: Some(color),
            face,
        }
    }

    /// Create an unbound wild-family card.
    #[must_use]
    pub const fn wild(id: CardId, face: Face) -> Self {
        Self {
            id,
            color: None,
            face,
        }
    }

    #[must_use]
    pub const fn is_wild(&self) -> bool {
        self.face.is_wild()
    }

    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.face.is_draw()
    }

    /// Bind a wild-family card to the color chosen when it was played.
    pub fn bind_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    /// Drop any chosen color from a wild-family card. Colored cards are
    /// left unchanged.
    pub fn clear_wild_color(&mut self) {
        if self.is_wild() {
            self.color = None;
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.color {
            Some(color) if !self.is_wild() => write!(f, "{color} {}", self.face),
            Some(color) => write!(f, "{} ({color})", self.face),
            None => write!(f, "{}", self.face),
        }
    }
}
