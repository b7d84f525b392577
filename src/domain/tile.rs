/// Tile types and their properties.
/// Properties are queried via a capability set, not ad hoc character
/// tests, so tile semantics are centralized here.
///
/// A tile answers three independent questions:
///   - SOLID    = blocks entry, and something can stand on top of it
///   - WALKABLE = the character's body can occupy the cell
///   - GROUND   = counts toward ground-based metrics (heights, segments, holes)
///
/// Markers (start, exit, enemy) are carried as extra capabilities.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Start,
    Exit,
    Ground,
    PyramidBlock,
    Platform,
    PlatformBackground,
    NormalBrick,
    CoinBrick,
    LifeBrick,
    SpecialBrick,
    SpecialQuestionBlock,
    CoinQuestionBlock,
    LifeHiddenBlock, // counts as ground, but only knocked from below
    CoinHiddenBlock,
    UsedBlock,
    Coin,
    Pipe,
    PipeFlower,
    BulletBill,
    Goomba,
    WingedGoomba,
    RedKoopa,
    WingedRedKoopa,
    GreenKoopa,
    WingedGreenKoopa,
    Spiky,
    WingedSpiky,
    Other,
}

impl Tile {
    /// Map a level-text symbol to its tile. Total: unknown symbols are `Other`.
    pub fn from_char(c: char) -> Tile {
        match c {
            '-' => Tile::Empty,
            'M' => Tile::Start,
            'F' => Tile::Exit,
            'X' => Tile::Ground,
            '#' => Tile::PyramidBlock,
            '%' => Tile::Platform,
            '|' => Tile::PlatformBackground,
            'S' => Tile::NormalBrick,
            'C' => Tile::CoinBrick,
            'L' => Tile::LifeBrick,
            'U' => Tile::SpecialBrick,
            '@' | '?' | 'Q' => Tile::SpecialQuestionBlock,
            '!' => Tile::CoinQuestionBlock,
            '1' => Tile::LifeHiddenBlock,
            '2' => Tile::CoinHiddenBlock,
            'D' => Tile::UsedBlock,
            'o' => Tile::Coin,
            't' | '<' | '>' | '[' | ']' => Tile::Pipe,
            'T' => Tile::PipeFlower,
            '*' | 'B' | 'b' => Tile::BulletBill,
            'g' | 'E' => Tile::Goomba,
            'G' => Tile::WingedGoomba,
            'r' => Tile::RedKoopa,
            'R' => Tile::WingedRedKoopa,
            'k' => Tile::GreenKoopa,
            'K' => Tile::WingedGreenKoopa,
            'y' => Tile::Spiky,
            'Y' => Tile::WingedSpiky,
            _ => Tile::Other,
        }
    }

    pub fn traits(self) -> TileTraits {
        use Tile::*;
        match self {
            Ground | PyramidBlock | Platform | NormalBrick | CoinBrick | LifeBrick
            | SpecialBrick | SpecialQuestionBlock | CoinQuestionBlock | UsedBlock
            | Pipe | PipeFlower | BulletBill => TileTraits::SOLID.with(TileTraits::GROUND),
            LifeHiddenBlock | CoinHiddenBlock => TileTraits::WALKABLE.with(TileTraits::GROUND),
            Goomba | WingedGoomba | RedKoopa | WingedRedKoopa | GreenKoopa
            | WingedGreenKoopa | Spiky | WingedSpiky => TileTraits::WALKABLE.with(TileTraits::ENEMY),
            Start => TileTraits::WALKABLE.with(TileTraits::START),
            Exit => TileTraits::WALKABLE.with(TileTraits::EXIT),
            Empty | PlatformBackground | Coin | Other => TileTraits::WALKABLE,
        }
    }

    pub fn category(self) -> TileCategory {
        self.traits().category()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}

/// Classify a raw level symbol.
pub fn classify(c: char) -> TileTraits {
    Tile::from_char(c).traits()
}

/// Capability bitset of a tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct TileTraits(u8);

impl TileTraits {
    pub const NONE: TileTraits = TileTraits(0);
    pub const SOLID: TileTraits = TileTraits(1 << 0);
    pub const WALKABLE: TileTraits = TileTraits(1 << 1);
    pub const GROUND: TileTraits = TileTraits(1 << 2);
    pub const ENEMY: TileTraits = TileTraits(1 << 3);
    pub const START: TileTraits = TileTraits(1 << 4);
    pub const EXIT: TileTraits = TileTraits(1 << 5);

    pub const fn with(self, other: TileTraits) -> TileTraits {
        TileTraits(self.0 | other.0)
    }

    pub const fn contains(self, other: TileTraits) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: TileTraits) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_solid(self) -> bool {
        self.contains(TileTraits::SOLID)
    }

    pub fn is_walkable(self) -> bool {
        self.contains(TileTraits::WALKABLE)
    }

    pub fn is_ground(self) -> bool {
        self.contains(TileTraits::GROUND)
    }

    pub fn is_enemy(self) -> bool {
        self.contains(TileTraits::ENEMY)
    }

    /// Counted by structural coherence.
    pub fn is_solid_or_ground(self) -> bool {
        self.intersects(TileTraits::SOLID.with(TileTraits::GROUND))
    }

    /// Primary category, in priority order: ground, solid, markers, enemy,
    /// walkable, other.
    pub fn category(self) -> TileCategory {
        if self.is_ground() {
            TileCategory::GroundLike
        } else if self.is_solid() {
            TileCategory::Solid
        } else if self.contains(TileTraits::START) {
            TileCategory::StartMarker
        } else if self.contains(TileTraits::EXIT) {
            TileCategory::ExitMarker
        } else if self.is_enemy() {
            TileCategory::Enemy
        } else if self.is_walkable() {
            TileCategory::Walkable
        } else {
            TileCategory::Other
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileCategory {
    GroundLike,
    Solid,
    Walkable,
    StartMarker,
    ExitMarker,
    Enemy,
    Other,
}
