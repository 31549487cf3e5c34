pub mod reference;

// re-export for cleaner imports
pub use self::reference::{GenomeAssembly, SequenceLookup};
