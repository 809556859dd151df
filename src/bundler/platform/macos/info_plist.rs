//! Info.plist template loading and in-place persistence.

use crate::bundler::error::ManifestError;
use plist::{Dictionary, Value};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

/// A manifest loaded from its template, written back to the same path.
#[derive(Clone, Debug)]
pub struct InfoPlist {
    path: PathBuf,
    dict: Dictionary,
}

impl InfoPlist {
    /// Loads the template at `path`.
    ///
    /// Binary and XML property lists are both accepted; the root must be a
    /// dictionary.
    pub async fn load(path: &Path) -> Result<Self, ManifestError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::TemplateMissing {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::TemplateUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let value =
            Value::from_reader(Cursor::new(bytes)).map_err(|source| ManifestError::TemplateInvalid {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Dictionary(dict) => Ok(Self {
                path: path.to_path_buf(),
                dict,
            }),
            _ => Err(ManifestError::NotADictionary {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Path the manifest was loaded from and will be saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level dictionary.
    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Mutable top-level dictionary.
    pub fn dict_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    /// Serializes the whole manifest, then writes it over the template.
    ///
    /// Serialization happens before the file is opened, so a failure never
    /// leaves a truncated manifest behind.
    pub async fn save(&self) -> Result<(), ManifestError> {
        let mut buf = Vec::new();
        Value::Dictionary(self.dict.clone())
            .to_writer_xml(&mut buf)
            .map_err(|source| ManifestError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        buf.push(b'\n');

        tokio::fs::write(&self.path, buf)
            .await
            .map_err(|source| ManifestError::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }
}
