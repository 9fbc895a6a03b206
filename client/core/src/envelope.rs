//! Backend response envelope
//!
//! Every domain endpoint answers `{ success, message, data }`. Domain APIs
//! hand the envelope back untouched; [`Envelope::into_data`] is the one place
//! it is unwrapped.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Payload of a successful envelope
    ///
    /// `success: false` becomes [`Error::Rejected`] carrying the backend
    /// message; a successful envelope without data becomes
    /// [`Error::MissingData`].
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(Error::Rejected {
                message: self.message,
            });
        }
        self.data.ok_or(Error::MissingData)
    }

    /// Like [`Envelope::into_data`] but tolerates an absent payload
    pub fn into_optional(self) -> Result<Option<T>> {
        if !self.success {
            return Err(Error::Rejected {
                message: self.message,
            });
        }
        Ok(self.data)
    }
}
