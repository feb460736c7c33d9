//! In-memory page model for formpilot.
//!
//! [`SnapshotPage`] implements [`PageModel`] over a JSON description of a
//! form. DOM effects requested by the engine are applied to the snapshot's own
//! state (visibility, disabled flag, suggestion lists) and every script and
//! field interaction is recorded, so a pass can be inspected afterwards.
//!
//! ## Snapshot format
//!
//! ```json
//! {
//!   "location": "https://example.com/signup",
//!   "forms": ["form#signup"],
//!   "fields": [
//!     { "name": "country", "tag": "select", "options": ["US", "CA"], "value": "US" },
//!     { "name": "newsletter", "type": "checkbox", "checked": false },
//!     { "name": "email", "value": "" }
//!   ]
//! }
//! ```
//!
//! [`PageModel`]: formpilot_protocols::PageModel

mod error;
mod field;
mod page;

pub use error::SnapshotError;
pub use field::{Interaction, SnapshotField};
pub use page::{PageSnapshot, SnapshotPage};
