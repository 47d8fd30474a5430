//! Document records and their files on disk.
//!
//! Files live at `<upload_dir>/<practice_id>/<document_id>_<file_name>`.
//! The record and the file are written and removed together: a failed
//! record write removes the file, and deletion removes the file before
//! the record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::*;

/// Reject empty names and anything that could escape its directory.
fn validate_path_component(field: &str, value: &str) -> Result<(), ControllerError> {
    if value.is_empty() {
        return Err(ControllerError::Validation(format!("{field} is required")));
    }
    if value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0')
    {
        return Err(ControllerError::Validation(format!(
            "{field} is not a plain file name: {value:?}"
        )));
    }
    Ok(())
}

/// Best-effort removal used on failure paths.
fn remove_file_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to clean up document file");
        }
    }
}

impl Controller {
    /// Directory holding one practice's uploaded files.
    pub fn practice_upload_dir(&self, practice_id: &str) -> PathBuf {
        self.upload_dir.join(practice_id)
    }

    /// Store `content` as a new document of `practice_id`.
    ///
    /// Nothing is written when the name or content is empty. If the record
    /// cannot be persisted the file is removed again.
    pub fn upload_document(
        &self,
        practice_id: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<String, ControllerError> {
        if content.is_empty() {
            return Err(ControllerError::Validation("file is required".into()));
        }
        validate_path_component("fileName", file_name)?;
        validate_path_component("practiceId", practice_id)?;

        let dir = self.practice_upload_dir(practice_id);
        fs::create_dir_all(&dir).map_err(ControllerError::io("creating directory", &dir))?;

        let document_id = Uuid::new_v4().to_string();
        let storage_path = dir.join(format!("{document_id}_{file_name}"));

        if let Err(source) = fs::write(&storage_path, content) {
            remove_file_quietly(&storage_path);
            return Err(ControllerError::Io {
                action: "saving file",
                path: storage_path,
                source,
            });
        }

        let document = Document {
            document_id: document_id.clone(),
            practice_id: practice_id.to_string(),
            file_name: file_name.to_string(),
            storage_path: storage_path.to_string_lossy().into_owned(),
        };
        if let Err(e) = self.documents.upsert(&id_filter::<Document>(&document_id), &document) {
            tracing::warn!(
                document_id = %document_id,
                error = %e,
                "Document record failed, removing stored file"
            );
            remove_file_quietly(&storage_path);
            return Err(e.into());
        }

        tracing::info!(
            document_id = %document_id,
            practice_id = %practice_id,
            bytes = content.len(),
            "Document uploaded"
        );
        Ok(document_id)
    }

    pub fn read_document(&self, document_id: &str) -> Result<Document, ControllerError> {
        read_record(self.documents.as_ref(), document_id)
    }

    /// The record plus the bytes of its stored file.
    pub fn read_document_content(
        &self,
        document_id: &str,
    ) -> Result<(Document, Vec<u8>), ControllerError> {
        let document = self.read_document(document_id)?;
        let content = fs::read(&document.storage_path)
            .map_err(ControllerError::io("reading file", &document.storage_path))?;
        Ok((document, content))
    }

    pub fn list_documents(&self, practice_id: &str) -> Result<Vec<Document>, ControllerError> {
        list_children(self.documents.as_ref(), practice_id)
    }

    /// Remove the stored file, then the record.
    ///
    /// An unknown id is treated as already deleted. Any other failure to
    /// look the record up fails the call and leaves the file untouched.
    pub fn delete_document(&self, document_id: &str) -> Result<(), ControllerError> {
        let document = match self.read_document(document_id) {
            Ok(document) => document,
            Err(e) if e.is_not_found() => {
                tracing::debug!(document_id = %document_id, "Document already deleted");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match fs::remove_file(&document.storage_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    document_id = %document_id,
                    path = %document.storage_path,
                    "Document file already missing"
                );
            }
            Err(source) => {
                return Err(ControllerError::Io {
                    action: "removing file",
                    path: PathBuf::from(&document.storage_path),
                    source,
                })
            }
        }

        delete_record(self.documents.as_ref(), document_id)
    }
}
