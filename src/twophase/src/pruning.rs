//! Pruning tables: exact distances to the goal in the product space of two
//! coordinates, used as admissible heuristics by the phase searches.

use crate::{
    canonical_fsm::CanonicalFSM,
    config::TableConfig,
    coords::{
        Coordinate, CornerPerm, EdgePerm, Flip, MoveTable, MoveTables, Slice, SlicePerm, Twist,
    },
    start, success, working,
};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU8, Ordering},
    },
    time::Instant,
};
use thiserror::Error;

const MAGIC: &[u8; 8] = b"2PHSPRU2";
const UNSEEN: u8 = u8::MAX;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error while reading or writing a pruning table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a pruning table file")]
    BadMagic,
    #[error("Expected a {expected} table but found a {found} table")]
    WrongKind { expected: TableKind, found: u8 },
    #[error("Expected {expected} entries but found {found}")]
    WrongLength { expected: usize, found: u64 },
    #[error(
        "The table stops at depth {found} but {} was requested",
        depth_limit(.expected.as_ref())
    )]
    WrongCeiling { expected: Option<u8>, found: u8 },
    #[error("The pruning table is corrupt: only the goal may have distance zero")]
    Corrupt,
    #[error("Could not start the table generation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Which pair of coordinates a table is indexed by. The first coordinate
/// is the major index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TableKind {
    TwistSlice,
    FlipSlice,
    CornerPermSlicePerm,
    EdgePermSlicePerm,
}

impl TableKind {
    pub const ALL: [Self; 4] = {
        use TableKind::*;
        let v = [
            TwistSlice,
            FlipSlice,
            CornerPermSlicePerm,
            EdgePermSlicePerm,
        ];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    fn from_u8(kind: u8) -> Option<Self> {
        Self::ALL.get(usize::from(kind)).copied()
    }

    /// Number of values the minor coordinate takes.
    #[must_use]
    pub fn minor_count(self) -> usize {
        match self {
            TableKind::TwistSlice | TableKind::FlipSlice => Slice::COUNT,
            TableKind::CornerPermSlicePerm | TableKind::EdgePermSlicePerm => SlicePerm::COUNT,
        }
    }

    #[must_use]
    pub fn entry_count(self) -> usize {
        let major_count = match self {
            TableKind::TwistSlice => Twist::COUNT,
            TableKind::FlipSlice => Flip::COUNT,
            TableKind::CornerPermSlicePerm => CornerPerm::COUNT,
            TableKind::EdgePermSlicePerm => EdgePerm::COUNT,
        };
        major_count * self.minor_count()
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::TwistSlice => "twist_slice.bin",
            TableKind::FlipSlice => "flip_slice.bin",
            TableKind::CornerPermSlicePerm => "corner_perm_slice_perm.bin",
            TableKind::EdgePermSlicePerm => "edge_perm_slice_perm.bin",
        }
    }

    fn move_tables(self, moves: &MoveTables) -> (&MoveTable, &MoveTable) {
        match self {
            TableKind::TwistSlice => (&moves.twist, &moves.slice),
            TableKind::FlipSlice => (&moves.flip, &moves.slice),
            TableKind::CornerPermSlicePerm => (&moves.corner_perm, &moves.slice_perm),
            TableKind::EdgePermSlicePerm => (&moves.edge_perm, &moves.slice_perm),
        }
    }

    fn move_count(self) -> usize {
        match self {
            TableKind::TwistSlice | TableKind::FlipSlice => crate::Move::ALL.len(),
            TableKind::CornerPermSlicePerm | TableKind::EdgePermSlicePerm => {
                crate::Move::PHASE2.len()
            }
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TableKind::TwistSlice => "twist × slice",
            TableKind::FlipSlice => "flip × slice",
            TableKind::CornerPermSlicePerm => "corner permutation × slice permutation",
            TableKind::EdgePermSlicePerm => "edge permutation × slice permutation",
        })
    }
}

fn depth_limit(ceiling: Option<&u8>) -> String {
    ceiling.map_or_else(|| "no limit".to_owned(), |ceiling| format!("depth {ceiling}"))
}

/// One byte per coordinate pair: the fewest moves from that pair to the
/// goal, or one more than the depth ceiling if the search stopped early.
#[derive(Clone, PartialEq, Eq)]
pub struct PruningTable {
    kind: TableKind,
    /// The depth the search stopped at, if it stopped before reaching
    /// every entry.
    ceiling: Option<u8>,
    distances: Box<[u8]>,
}

impl std::fmt::Debug for PruningTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PruningTable")
            .field("kind", &self.kind)
            .field("ceiling", &self.ceiling)
            .field("len", &self.distances.len())
            .finish()
    }
}

impl PruningTable {
    /// Breadth-first search outwards from the goal, one level at a time.
    /// Each level is expanded in parallel on the current rayon pool.
    #[must_use]
    pub fn build(kind: TableKind, moves: &MoveTables, max_depth: Option<u8>) -> Self {
        let (major_table, minor_table) = kind.move_tables(moves);
        let minor_count = kind.minor_count();
        let move_count = kind.move_count();
        let len = kind.entry_count();

        info!(start!("Building the {} pruning table..."), kind);
        let start = Instant::now();

        let distances: Box<[AtomicU8]> = (0..len).map(|_| AtomicU8::new(UNSEEN)).collect();
        distances[0].store(0, Ordering::Relaxed);

        let mut depth = 0;
        let mut filled = 1;
        while filled < len && max_depth.is_none_or(|max_depth| depth < max_depth) {
            let depth_start = Instant::now();
            let discovered: usize = (0..len)
                .into_par_iter()
                .filter(|&index| distances[index].load(Ordering::Relaxed) == depth)
                .map(|index| {
                    let major = (index / minor_count) as u16;
                    let minor = (index % minor_count) as u16;
                    let mut discovered = 0;
                    for move_index in 0..move_count {
                        let next = usize::from(major_table.apply(major, move_index))
                            * minor_count
                            + usize::from(minor_table.apply(minor, move_index));
                        if distances[next]
                            .compare_exchange(
                                UNSEEN,
                                depth + 1,
                                Ordering::Relaxed,
                                Ordering::Relaxed,
                            )
                            .is_ok()
                        {
                            discovered += 1;
                        }
                    }
                    discovered
                })
                .sum();
            if discovered == 0 {
                break;
            }
            depth += 1;
            filled += discovered;
            debug!(
                working!("Depth {}: {} new entries ({}/{}) in {:.3}s"),
                depth,
                discovered,
                filled,
                len,
                depth_start.elapsed().as_secs_f64()
            );
        }

        let ceiling = (filled < len).then_some(depth);
        // Anything unreached is at least one move beyond the last level
        let distances = distances
            .into_vec()
            .into_iter()
            .map(|distance| match distance.into_inner() {
                UNSEEN => depth + 1,
                distance => distance,
            })
            .collect();

        info!(
            success!("Built the {} pruning table ({} entries, depth {}) in {:.3}s"),
            kind,
            len,
            depth,
            start.elapsed().as_secs_f64()
        );
        Self {
            kind,
            ceiling,
            distances,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// The depth the breadth-first search stopped at, or `None` if every
    /// entry holds its exact distance.
    #[must_use]
    pub fn ceiling(&self) -> Option<u8> {
        self.ceiling
    }

    /// The stored distance of a coordinate pair.
    #[inline]
    #[must_use]
    pub fn distance(&self, major: u16, minor: u16) -> u8 {
        self.distances[usize::from(major) * self.kind.minor_count() + usize::from(minor)]
    }

    /// The largest stored distance.
    #[must_use]
    pub fn depth(&self) -> u8 {
        self.distances.iter().copied().max().unwrap_or(0)
    }

    /// Serialize as the magic header, the kind tag, the depth ceiling
    /// (`0xFF` for a complete table), the little-endian entry count, and the
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns any error of the writer.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), TableError> {
        writer.write_all(MAGIC)?;
        writer.write_all(&[self.kind as u8])?;
        writer.write_all(&[self.ceiling.unwrap_or(UNSEEN)])?;
        writer.write_all(&(self.distances.len() as u64).to_le_bytes())?;
        writer.write_all(&self.distances)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a table written by [`PruningTable::write_to`]. A complete table
    /// satisfies any `ceiling`; a capped one only the ceiling it was built
    /// with.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a table of kind `expected` built
    /// for `ceiling`, or cannot be read.
    pub fn read_from(
        mut reader: impl Read,
        expected: TableKind,
        ceiling: Option<u8>,
    ) -> Result<Self, TableError> {
        let mut magic = [0; MAGIC.len()];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(TableError::BadMagic);
        }

        let mut kind = [0];
        reader.read_exact(&mut kind)?;
        if TableKind::from_u8(kind[0]) != Some(expected) {
            return Err(TableError::WrongKind {
                expected,
                found: kind[0],
            });
        }

        let mut found_ceiling = [0];
        reader.read_exact(&mut found_ceiling)?;
        let found_ceiling = match found_ceiling[0] {
            UNSEEN => None,
            found => Some(found),
        };
        if let Some(found) = found_ceiling
            && ceiling != Some(found)
        {
            return Err(TableError::WrongCeiling {
                expected: ceiling,
                found,
            });
        }

        let mut len = [0; 8];
        reader.read_exact(&mut len)?;
        let len = u64::from_le_bytes(len);
        if len != expected.entry_count() as u64 {
            return Err(TableError::WrongLength {
                expected: expected.entry_count(),
                found: len,
            });
        }

        let mut distances = vec![0; expected.entry_count()].into_boxed_slice();
        reader.read_exact(&mut distances)?;
        if distances[0] != 0 || distances[1..].contains(&0) {
            return Err(TableError::Corrupt);
        }

        Ok(Self {
            kind: expected,
            ceiling: found_ceiling,
            distances,
        })
    }
}

/// Everything a solve needs that does not depend on the cube: move tables,
/// the four pruning tables, and the canonical sequence automaton. Immutable
/// once built, so one instance can serve any number of threads.
pub struct Tables {
    pub(crate) moves: MoveTables,
    pub(crate) twist_slice: PruningTable,
    pub(crate) flip_slice: PruningTable,
    pub(crate) corner_perm_slice_perm: PruningTable,
    pub(crate) edge_perm_slice_perm: PruningTable,
    pub(crate) canonical_fsm: CanonicalFSM,
}

static SHARED: OnceLock<Arc<Tables>> = OnceLock::new();

/// Run `f` on a pool of `threads` workers, or on rayon's global pool when
/// unset.
fn in_pool<R: Send>(
    threads: Option<usize>,
    f: impl FnOnce() -> R + Send,
) -> Result<R, TableError> {
    match threads {
        Some(threads) => Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(f)),
        None => Ok(f()),
    }
}

impl Tables {
    /// Generate every table from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested thread pool cannot be started.
    pub fn build(config: &TableConfig) -> Result<Self, TableError> {
        in_pool(config.threads, || {
            let moves = MoveTables::build();
            Self::from_parts(&moves, |kind| {
                PruningTable::build(kind, &moves, config.max_depth)
            })
        })
    }

    /// Load every table from the cache directory, building and caching any
    /// that are missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested thread pool cannot be started.
    /// Cache failures are logged and otherwise ignored.
    pub fn load_or_build(config: &TableConfig) -> Result<Self, TableError> {
        in_pool(config.threads, || Self::load_or_build_in_current_pool(config))
    }

    /// The process-wide tables, built or loaded with the default
    /// configuration on first use unless [`Tables::init_shared`] came first.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| {
            Arc::new(Self::load_or_build_in_current_pool(&TableConfig::default()))
        }))
    }

    /// Make `tables` the process-wide tables.
    ///
    /// # Errors
    ///
    /// Gives `tables` back if the shared tables already exist.
    pub fn init_shared(tables: Arc<Self>) -> Result<(), Arc<Self>> {
        SHARED.set(tables)
    }

    fn load_or_build_in_current_pool(config: &TableConfig) -> Self {
        let moves = MoveTables::build();
        let cache_dir = config.cache_dir();
        Self::from_parts(&moves, |kind| {
            if let Some(dir) = &cache_dir {
                let path = dir.join(kind.file_name());
                match File::open(&path) {
                    Ok(file) => match PruningTable::read_from(
                        BufReader::new(file),
                        kind,
                        config.max_depth,
                    ) {
                        Ok(table) => {
                            info!(
                                success!("Loaded the {} pruning table from {}"),
                                kind,
                                path.display()
                            );
                            return table;
                        }
                        Err(err) => warn!("Ignoring cached table {}: {err}", path.display()),
                    },
                    Err(err) => debug!("No cached table at {}: {err}", path.display()),
                }
            }

            let table = PruningTable::build(kind, &moves, config.max_depth);
            if let Some(dir) = &cache_dir
                && let Err(err) = Self::save_table(&table, dir)
            {
                warn!(
                    "Could not cache the {kind} pruning table in {}: {err}",
                    dir.display()
                );
            }
            table
        })
    }

    fn from_parts(moves: &MoveTables, mut table: impl FnMut(TableKind) -> PruningTable) -> Self {
        Self {
            twist_slice: table(TableKind::TwistSlice),
            flip_slice: table(TableKind::FlipSlice),
            corner_perm_slice_perm: table(TableKind::CornerPermSlicePerm),
            edge_perm_slice_perm: table(TableKind::EdgePermSlicePerm),
            moves: moves.clone(),
            canonical_fsm: CanonicalFSM::new(),
        }
    }

    fn save_table(table: &PruningTable, dir: &Path) -> Result<(), TableError> {
        std::fs::create_dir_all(dir)?;
        table.write_to(BufWriter::new(File::create(dir.join(table.kind().file_name()))?))
    }

    /// Write every pruning table into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error.
    pub fn save(&self, dir: &Path) -> Result<(), TableError> {
        for table in self.pruning_tables() {
            Self::save_table(table, dir)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn pruning_tables(&self) -> [&PruningTable; 4] {
        [
            &self.twist_slice,
            &self.flip_slice,
            &self.corner_perm_slice_perm,
            &self.edge_perm_slice_perm,
        ]
    }
}

/// Tables built once for every unit test in the crate.
#[cfg(test)]
static TEST_TABLES: std::sync::LazyLock<Arc<Tables>> =
    std::sync::LazyLock::new(|| Arc::new(Tables::build(&TableConfig::default()).unwrap()));

#[cfg(test)]
pub(crate) fn test_tables() -> &'static Tables {
    &TEST_TABLES
}

#[cfg(test)]
pub(crate) fn test_tables_arc() -> Arc<Tables> {
    Arc::clone(&TEST_TABLES)
}
