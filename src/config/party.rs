use serde::{Deserialize, Serialize};

/// Sender or customer shown in the party block.
///
/// Every field is optional; the layout engine substitutes a placeholder for
/// anything missing instead of dropping the line.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Party {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Displayable image reference (path or URL), already resolved by the caller
    #[serde(default)]
    pub logo: Option<String>,
}

impl Party {
    /// Contact fields in display order
    pub fn contact_fields(&self) -> [Option<&str>; 4] {
        [
            self.name.as_deref(),
            self.phone.as_deref(),
            self.email.as_deref(),
            self.address.as_deref(),
        ]
    }

    /// Logo reference, ignoring blank values
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref().filter(|s| !s.trim().is_empty())
    }
}
