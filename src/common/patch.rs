use serde::{Deserialize, Deserializer};

/// Desserializa um campo em três estados: ausente (`None`), presente como
/// `null` (`Some(None)`) ou presente com valor (`Some(Some(v))`).
///
/// Use junto com `#[serde(default)]`: o default cobre o campo ausente e esta
/// função só roda quando a chave existe no JSON.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
