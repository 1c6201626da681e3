use super::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a door in the layout.
    pub struct DoorId;
}

/// Default door width in layout units.
pub const DEFAULT_DOOR_WIDTH: f64 = 36.0;

/// An explicit opening placed on a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorData {
    /// Wall the door sits in.
    pub wall: WallId,
    /// Position of the door center along the wall, in `[0, 1]`.
    pub position: f64,
    pub width: f64,
}

impl DoorData {
    /// Creates a door of default width at the middle of `wall`.
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self {
            wall,
            position: 0.5,
            width: DEFAULT_DOOR_WIDTH,
        }
    }

    #[must_use]
    pub fn at(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}
