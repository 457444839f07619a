//! Strategy catalog source port trait.

use crate::domain::error::DeckError;
use crate::domain::strategy::Strategy;

pub trait CatalogPort {
    /// Short name for log lines and error messages.
    fn source_name(&self) -> String;

    /// Strategies in display order.
    fn load(&self) -> Result<Vec<Strategy>, DeckError>;
}
