use crate::scope::{ScopeLevel, VirtualScope};

/// Upper bound for [`OrderConfig::with_levels`].
pub const MAX_LEVELS: usize = 64;

/// Upper bound for [`OrderConfig::with_bands`].
pub const MAX_BANDS: u32 = 256;

/// How many scope levels and priority bands the engine partitions over.
///
/// Bands `0..bands` are the explicit priorities a fixture can be registered
/// with, and each gets its own pass per level. Keys without a registered
/// priority, or with one at or past `bands`, fall into the lowest band, which
/// has no pass: the engine leaves their relative order as it found it.
///
/// [`OrderConfig::scope_only`] is the plain scope grouping a host does on its
/// own. Every key lands in band `0` of its level there, whatever its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConfig {
    levels: usize,
    bands: u32,
    scope_only: bool,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            levels: ScopeLevel::FUNCTION.index(),
            bands: 3,
            scope_only: false,
        }
    }
}

impl OrderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group by scope only, ignoring any registered priority.
    pub fn scope_only() -> Self {
        Self {
            scope_only: true,
            ..Self::default()
        }
    }

    /// Set the number of grouped levels, capped at [`MAX_LEVELS`].
    pub fn with_levels(self, levels: usize) -> Self {
        Self {
            levels: levels.min(MAX_LEVELS),
            ..self
        }
    }

    /// Set the number of explicit bands, capped at [`MAX_BANDS`].
    pub fn with_bands(self, bands: u32) -> Self {
        Self {
            bands: bands.min(MAX_BANDS),
            ..self
        }
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn bands(&self) -> u32 {
        self.bands
    }

    pub fn is_scope_only(&self) -> bool {
        self.scope_only
    }

    pub fn lowest_band(&self) -> u32 {
        self.bands
    }

    /// Map a registered priority onto a band, clamping to the lowest one.
    pub fn band_of(&self, priority: u32) -> u32 {
        match self.scope_only {
            true => 0,
            false => priority.min(self.lowest_band()),
        }
    }

    fn passes_per_level(&self) -> usize {
        match self.scope_only {
            true => 1,
            false => self.bands as usize,
        }
    }

    pub fn pass_count(&self) -> usize {
        self.levels * self.passes_per_level()
    }

    /// Index of the pass for `scope`, if the config runs one.
    pub fn pass_of(&self, scope: VirtualScope) -> Option<usize> {
        let level = scope.level.index();
        let band = scope.band as usize;
        let per_level = self.passes_per_level();
        match level < self.levels && band < per_level {
            true => Some(level * per_level + band),
            false => None,
        }
    }

    /// All virtual scopes in pass order: level-major, band-minor.
    pub fn virtual_scopes(&self) -> impl ExactSizeIterator<Item = VirtualScope> + use<> {
        let per_level = self.passes_per_level();
        (0..self.pass_count()).map(move |pass| VirtualScope {
            level: ScopeLevel::new(pass / per_level),
            band: (pass % per_level) as u32,
        })
    }
}
