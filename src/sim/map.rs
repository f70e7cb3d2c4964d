//! Tile map: terrain grid and structure generation
//!
//! The grid is only consulted for map queries. Collision always runs
//! against the generated `Structure` rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::structure::{Structure, StructureKind};
use crate::settings::MatchConfig;

/// Level 1 layout, one character per tile:
/// `.` empty, `B` brick, `I` iron, `W` river, `F` forest, `H` headquarters
const LEVEL_1: [&str; 19] = [
    "IIIIIIIIIIIIIIIIIIIIIIIIII",
    "I.F.F.FWFW......WFWF.F.F.I",
    "I.F.F.FWFW......WFWF.F.F.I",
    "IBBBBBBBBBB....BBBBBBBBBBI",
    "IB.......BB....B.......BBI",
    "IB.BBBBB.BB.BBBB.BBBBB.BBI",
    "IB.B...B.BB.B...B.B...B.BI",
    "IB.BBBBB.BB.BBBB.BBBBB.BBI",
    "I...WWW...WWWWWWWWWW.....I",
    "I.III.............III....I",
    "I.I...BBBBBBBBBBB..I.....I",
    "IFBFBFBFBFBFBFBFBFBFBFBFBI",
    "IBFBFBFBFBFBFBFBFBFBFBFBFI",
    "IFBFBFBFBF......BFBFBFBFBI",
    "IBFBFBFBFB......BFBFBFBFBI",
    "IFBFBFBFBFBFBFBFBFBFBFBFBI",
    "..........................",
    "BBBBBBBBBBBBBBBBBBBBBBBBBB",
    "IIIIIIIIIIIIHIIIIIIIIIIIII",
];

/// Terrain code for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Brick,
    Iron,
    River,
    Forest,
    Headquarters,
}

impl Tile {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Tile::Empty),
            'B' => Some(Tile::Brick),
            'I' => Some(Tile::Iron),
            'W' => Some(Tile::River),
            'F' => Some(Tile::Forest),
            'H' => Some(Tile::Headquarters),
            _ => None,
        }
    }

    fn structure_kind(self) -> Option<StructureKind> {
        match self {
            Tile::Empty => None,
            Tile::Brick => Some(StructureKind::Brick),
            Tile::Iron => Some(StructureKind::Iron),
            Tile::River => Some(StructureKind::River),
            Tile::Forest => Some(StructureKind::Forest),
            Tile::Headquarters => Some(StructureKind::Headquarters),
        }
    }

    /// Terrain a tank cannot drive through
    pub fn blocks_tank(self) -> bool {
        matches!(
            self,
            Tile::Brick | Tile::Iron | Tile::River | Tile::Headquarters
        )
    }
}

/// Error type for map loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No built-in layout for this level id.
    UnknownLevel(u32),
    /// Layout has no headquarters tile.
    MissingHeadquarters,
    /// Layout has more than one headquarters tile.
    MultipleHeadquarters,
    /// A row's width differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Unrecognised tile character.
    UnknownTile { row: usize, col: usize, ch: char },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(f, "No layout for level {level}"),
            Self::MissingHeadquarters => write!(f, "Map has no headquarters"),
            Self::MultipleHeadquarters => write!(f, "Map has more than one headquarters"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "Row {row} has {found} tiles, expected {expected}"),
            Self::UnknownTile { row, col, ch } => {
                write!(f, "Unknown tile '{ch}' at row {row}, col {col}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Immutable terrain grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    pub level: u32,
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Load a built-in level layout
    pub fn load(level: u32) -> Result<Self, MapError> {
        match level {
            1 => Self::parse(level, &LEVEL_1),
            _ => Err(MapError::UnknownLevel(level)),
        }
    }

    /// Parse a layout from text rows (see `LEVEL_1` for the alphabet)
    pub fn parse<S: AsRef<str>>(level: u32, rows: &[S]) -> Result<Self, MapError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(cols * rows.len());
        let mut hq_count = 0;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(MapError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(MapError::UnknownTile { row, col, ch })?;
                if tile == Tile::Headquarters {
                    hq_count += 1;
                }
                tiles.push(tile);
            }
        }

        match hq_count {
            0 => Err(MapError::MissingHeadquarters),
            1 => Ok(Self {
                level,
                cols,
                rows: rows.len(),
                tiles,
            }),
            _ => Err(MapError::MultipleHeadquarters),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Terrain at a cell; out of range reads as empty ground
    pub fn tile_at(&self, col: i32, row: i32) -> Tile {
        self.index(col, row).map_or(Tile::Empty, |i| self.tiles[i])
    }

    /// Whether a cell blocks tanks; out of range always blocks.
    /// Debug/secondary query only; collision uses structure rectangles.
    pub fn is_blocking(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_none_or(|i| self.tiles[i].blocks_tank())
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        Some(row * self.cols + col)
    }

    /// Build the structure list and the headquarters.
    ///
    /// Cells past the configured screen rows/columns are clipped. Empty cells
    /// directly above the headquarters get a protective brick.
    /// `next_id` allocates entity ids.
    pub fn structures(
        &self,
        config: &MatchConfig,
        mut next_id: impl FnMut() -> u32,
    ) -> (Vec<Structure>, Structure) {
        let tile = config.tile_size;
        let cols = self.cols.min(config.max_cols());
        let rows = self.rows.min(config.max_rows());
        let mut structures = Vec::new();
        let mut headquarters = None;

        for row in 0..rows {
            for col in 0..cols {
                let kind = match self.tiles[row * self.cols + col].structure_kind() {
                    Some(kind) => kind,
                    None => continue,
                };
                let pos = Vec2::new(col as f32 * tile, row as f32 * tile);
                if kind == StructureKind::Headquarters {
                    headquarters = Some((col, row, pos));
                } else {
                    structures.push(Structure::new(next_id(), kind, pos, tile));
                }
            }
        }

        let (hq_col, hq_row, hq_pos) = match headquarters {
            Some(hq) => hq,
            // Clipped away by a screen smaller than the map; keep it reachable
            None => {
                let i = self
                    .tiles
                    .iter()
                    .position(|&t| t == Tile::Headquarters)
                    .unwrap_or_default();
                let (col, row) = (i % self.cols, i / self.cols);
                let pos = Vec2::new(col as f32 * tile, row as f32 * tile)
                    .min(config.screen_rect().max() - config.headquarters_size)
                    .max(Vec2::ZERO);
                (col, row, pos)
            }
        };

        if hq_row > 0 {
            for dc in [-1, 0, 1] {
                let (col, row) = (hq_col as i32 + dc, hq_row as i32 - 1);
                if col >= 0 && (col as usize) < cols && self.tile_at(col, row) == Tile::Empty {
                    let pos = Vec2::new(col as f32 * tile, row as f32 * tile);
                    structures.push(Structure::new(next_id(), StructureKind::Brick, pos, tile));
                }
            }
        }

        let hq = Structure::new(
            next_id(),
            StructureKind::Headquarters,
            hq_pos,
            config.headquarters_size,
        );
        log::info!(
            "Level {}: {}x{} grid, {} structures, headquarters at ({}, {})",
            self.level,
            cols,
            rows,
            structures.len(),
            hq.rect.pos.x,
            hq.rect.pos.y
        );
        (structures, hq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> impl FnMut() -> u32 {
        let mut id = 0;
        move || {
            id += 1;
            id
        }
    }

    #[test]
    fn test_level_one_shape() {
        let map = TileMap::load(1).unwrap();
        assert_eq!(map.cols(), 26);
        assert_eq!(map.rows(), 19);
        assert_eq!(map.tile_at(12, 18), Tile::Headquarters);
        assert_eq!(map.tile_at(0, 0), Tile::Iron);
    }

    #[test]
    fn test_unknown_level() {
        assert_eq!(TileMap::load(7).unwrap_err(), MapError::UnknownLevel(7));
    }

    #[test]
    fn test_queries_out_of_range() {
        let map = TileMap::load(1).unwrap();
        assert!(map.is_blocking(-1, 0));
        assert!(map.is_blocking(0, 99));
        assert_eq!(map.tile_at(-1, 0), Tile::Empty);
        assert_eq!(map.tile_at(500, 500), Tile::Empty);
        // Forest and empty ground never block
        assert_eq!(map.tile_at(2, 1), Tile::Forest);
        assert!(!map.is_blocking(2, 1));
        assert!(!map.is_blocking(1, 1));
        assert!(map.is_blocking(7, 1)); // river
    }

    #[test]
    fn test_exactly_one_headquarters_required() {
        assert_eq!(
            TileMap::parse(2, &["...", "..."]).unwrap_err(),
            MapError::MissingHeadquarters
        );
        assert_eq!(
            TileMap::parse(2, &["H.H"]).unwrap_err(),
            MapError::MultipleHeadquarters
        );
        assert!(matches!(
            TileMap::parse(2, &["H..", ".."]).unwrap_err(),
            MapError::RaggedRow { row: 1, .. }
        ));
        assert!(matches!(
            TileMap::parse(2, &["H.x"]).unwrap_err(),
            MapError::UnknownTile { ch: 'x', .. }
        ));
    }

    #[test]
    fn test_structures_generated_from_grid() {
        let config = MatchConfig::default();
        let map = TileMap::load(1).unwrap();
        let (structures, hq) = map.structures(&config, counter());

        let non_empty = map
            .tiles
            .iter()
            .filter(|t| !matches!(t, Tile::Empty | Tile::Headquarters))
            .count();
        // Level 1 has bricks above the headquarters already: no extra walls
        assert_eq!(structures.len(), non_empty);
        assert_eq!(hq.kind, StructureKind::Headquarters);
        assert_eq!(hq.rect.pos, Vec2::new(360.0, 540.0));
        assert_eq!(hq.rect.size, Vec2::splat(config.headquarters_size));
    }

    #[test]
    fn test_protective_wall_fills_empty_cells() {
        let config = MatchConfig::default();
        let map = TileMap::parse(2, &[".....", ".I...", "..H.."]).unwrap();
        let (structures, _hq) = map.structures(&config, counter());
        let bricks: Vec<_> = structures
            .iter()
            .filter(|s| s.kind == StructureKind::Brick)
            .map(|s| s.rect.pos)
            .collect();
        // Iron already occupies the cell up-left of the headquarters
        assert_eq!(bricks, vec![Vec2::new(60.0, 30.0), Vec2::new(90.0, 30.0)]);
    }

    #[test]
    fn test_structures_clipped_to_screen() {
        let config = MatchConfig {
            screen_width: 60.0,
            screen_height: 60.0,
            ..MatchConfig::default()
        };
        let map = TileMap::parse(2, &["IIII", "IH.I", "IIII"]).unwrap();
        let (structures, _hq) = map.structures(&config, counter());
        assert!(
            structures
                .iter()
                .all(|s| s.rect.pos.x < 60.0 && s.rect.pos.y < 60.0)
        );
    }
}
