//! Discrete 9-way facing directions.
//!
//! Dice face one of the eight compass directions or stand idle. The enum
//! carries the lookup tables the wander AI and collision reactions need:
//! opposites, unit vectors, velocity bucketing and the per-direction
//! exclusion sets used when a vision ray hits a wall.

use raylib::prelude::Vector2;

use crate::rect::Rect;

/// Velocity components smaller than this are treated as zero when bucketing.
const BUCKET_EPSILON: f32 = 1e-3;

/// Discrete facing direction: eight compass octants plus idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Idle,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The eight compass directions, idle excluded.
    pub const COMPASS: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The direction pointing the opposite way. Idle maps to itself.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Idle => Direction::Idle,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Unit vector for this direction. Diagonals are normalized so every
    /// direction moves at the same speed. Idle is the zero vector.
    pub fn unit_vector(self) -> Vector2 {
        const DIAG: f32 = std::f32::consts::FRAC_1_SQRT_2;
        let (x, y) = match self {
            Direction::Idle => (0.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::UpLeft => (-DIAG, -DIAG),
            Direction::UpRight => (DIAG, -DIAG),
            Direction::DownLeft => (-DIAG, DIAG),
            Direction::DownRight => (DIAG, DIAG),
        };
        Vector2 { x, y }
    }

    /// Bucket a velocity into a facing. Zero velocity keeps `previous` so a
    /// die that stops does not snap its sprite around.
    pub fn from_velocity(velocity: Vector2, previous: Direction) -> Direction {
        let sx = if velocity.x > BUCKET_EPSILON {
            1
        } else if velocity.x < -BUCKET_EPSILON {
            -1
        } else {
            0
        };
        let sy = if velocity.y > BUCKET_EPSILON {
            1
        } else if velocity.y < -BUCKET_EPSILON {
            -1
        } else {
            0
        };
        match (sx, sy) {
            (0, 0) => previous,
            (0, -1) => Direction::Up,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            (-1, -1) => Direction::UpLeft,
            (1, -1) => Direction::UpRight,
            (-1, 1) => Direction::DownLeft,
            _ => Direction::DownRight,
        }
    }

    /// Directions that would keep walking into a wall seen while facing
    /// `self`. A cardinal facing blocks itself and its diagonal neighbors;
    /// a diagonal facing blocks itself and its two component cardinals.
    pub fn wall_excluded(self) -> &'static [Direction] {
        match self {
            Direction::Idle => &[],
            Direction::Up => &[Direction::Up, Direction::UpLeft, Direction::UpRight],
            Direction::Down => &[Direction::Down, Direction::DownLeft, Direction::DownRight],
            Direction::Left => &[Direction::Left, Direction::UpLeft, Direction::DownLeft],
            Direction::Right => &[Direction::Right, Direction::UpRight, Direction::DownRight],
            Direction::UpLeft => &[Direction::UpLeft, Direction::Up, Direction::Left],
            Direction::UpRight => &[Direction::UpRight, Direction::Up, Direction::Right],
            Direction::DownLeft => &[Direction::DownLeft, Direction::Down, Direction::Left],
            Direction::DownRight => &[Direction::DownRight, Direction::Down, Direction::Right],
        }
    }

    /// Compass directions allowed after spotting a wall while facing `self`.
    pub fn wall_allowed(self) -> Vec<Direction> {
        let excluded = self.wall_excluded();
        Direction::COMPASS
            .into_iter()
            .filter(|d| !excluded.contains(d))
            .collect()
    }

    /// Vision rectangle cast from `collider` in this direction.
    ///
    /// Cardinal facings get a collider-wide beam of `range` units; diagonal
    /// facings get a `range`-sided square anchored at the collider corner.
    /// Idle sees nothing.
    pub fn vision_rect(self, collider: &Rect, range: f32) -> Option<Rect> {
        let r = match self {
            Direction::Idle => return None,
            Direction::Up => Rect {
                x: collider.left(),
                y: collider.top() - range,
                width: collider.width,
                height: range,
            },
            Direction::Down => Rect {
                x: collider.left(),
                y: collider.bottom(),
                width: collider.width,
                height: range,
            },
            Direction::Left => Rect {
                x: collider.left() - range,
                y: collider.top(),
                width: range,
                height: collider.height,
            },
            Direction::Right => Rect {
                x: collider.right(),
                y: collider.top(),
                width: range,
                height: collider.height,
            },
            Direction::UpLeft => Rect {
                x: collider.left() - range,
                y: collider.top() - range,
                width: range,
                height: range,
            },
            Direction::UpRight => Rect {
                x: collider.right(),
                y: collider.top() - range,
                width: range,
                height: range,
            },
            Direction::DownLeft => Rect {
                x: collider.left() - range,
                y: collider.bottom(),
                width: range,
                height: range,
            },
            Direction::DownRight => Rect {
                x: collider.right(),
                y: collider.bottom(),
                width: range,
                height: range,
            },
        };
        Some(r)
    }

    /// Short lowercase label used to build animation keys.
    pub fn octant_label(self) -> &'static str {
        match self {
            Direction::Idle => "idle",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "upleft",
            Direction::UpRight => "upright",
            Direction::DownLeft => "downleft",
            Direction::DownRight => "downright",
        }
    }
}
