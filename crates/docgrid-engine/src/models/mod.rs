pub mod document;
pub mod phrase;
pub mod stable_id;
pub mod table;

pub use document::{Document, ParseWarning, ParsedDocument};
pub use phrase::{ParentRef, Phrase, PhraseBuilder, StructuralAttrs};
pub use stable_id::{EntityKind, StableId, StableIdError};
pub use table::{Cell, CellId, GridSpan, Table, TableId};
