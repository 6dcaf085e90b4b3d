//! Form-definition domain.
//!
//! - `identifiers`: validated field ids and the id generator
//! - `field`: field kinds, specs, updates, and the `Field` entity
//! - `store`: the `FormDefinitionStore` aggregate
//! - `events`: events recorded by the store
//! - `palette`: per-kind defaults for new fields
//! - `drag`: drag-to-reorder gesture resolution

pub mod drag;
pub mod events;
pub mod field;
pub mod identifiers;
pub mod palette;
pub mod store;

pub use drag::{DragOutcome, DragSession};
pub use events::{FormEvent, RecordedEvent};
pub use field::{Field, FieldError, FieldKind, FieldSpec, FieldUpdate, OptionEdit, Validation};
pub use identifiers::{FieldId, FieldIdGenerator, IdentifierError};
pub use palette::{FieldDefaults, Palette, PaletteEntry};
pub use store::{EditorMode, FormDefinitionStore, FormSnapshot, StoreError, EVENT_LOG_CAPACITY};
