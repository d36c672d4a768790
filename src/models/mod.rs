pub mod analysis;
pub mod publication;
pub mod settings;
pub mod summary;
pub mod works;

pub use analysis::*;
pub use publication::*;
pub use settings::*;
pub use summary::*;
pub use works::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that the remote APIs sometimes send as `null`
/// into its default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
