//! `.crm` binding stores
//!
//! A directory is bound to an assignment (or a classroom) when it contains
//! `.crm/assignment.json` (or `.crm/classroom.json`). The store operations
//! look at exactly the directory they are given; [`Workspace::discover`]
//! walks ancestors and applies the same policy to both bindings.

use crate::error::{Binding, StoreError};
use crate::models::{Assignment, Classroom};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Hidden folder holding the binding markers
pub const CRM_FOLDER: &str = ".crm";

/// Assignment binding marker
pub const ASSIGNMENT_FILE: &str = "assignment.json";

/// Classroom binding marker
pub const CLASSROOM_FILE: &str = "classroom.json";

/// A type persisted as a `.crm` marker file
pub trait Bindable: Serialize + DeserializeOwned {
    const BINDING: Binding;
    const FILE_NAME: &'static str;
}

impl Bindable for Assignment {
    const BINDING: Binding = Binding::Assignment;
    const FILE_NAME: &'static str = ASSIGNMENT_FILE;
}

impl Bindable for Classroom {
    const BINDING: Binding = Binding::Classroom;
    const FILE_NAME: &'static str = CLASSROOM_FILE;
}

/// Path of the marker for `T` inside `dir`
pub fn marker_path<T: Bindable>(dir: &Path) -> PathBuf {
    dir.join(CRM_FOLDER).join(T::FILE_NAME)
}

/// Whether `dir` itself holds a `T` binding
pub fn is_bound<T: Bindable>(dir: &Path) -> bool {
    marker_path::<T>(dir).exists()
}

/// Load the `T` binding of `dir`
pub fn load<T: Bindable>(dir: &Path) -> Result<T, StoreError> {
    let path = marker_path::<T>(dir);
    if !path.exists() {
        return Err(StoreError::not_found(T::BINDING, dir));
    }

    let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
        path: path.clone(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
}

/// Write the `T` binding of `dir`, replacing any previous one
pub fn save<T: Bindable>(dir: &Path, value: &T) -> Result<(), StoreError> {
    let folder = dir.join(CRM_FOLDER);
    fs::create_dir_all(&folder).map_err(|source| StoreError::Write {
        path: folder.clone(),
        source,
    })?;

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Serialize {
            binding: T::BINDING,
            source,
        })?;

    let path = folder.join(T::FILE_NAME);
    fs::write(&path, buffer).map_err(|source| StoreError::Write {
        path: path.clone(),
        source,
    })?;

    debug!("Saved {} binding to {}", T::BINDING, path.display());
    Ok(())
}

/// Nearest directory at or above `start` holding a `T` binding
pub fn discover<T: Bindable>(start: &Path) -> Result<Option<Bound<T>>, StoreError> {
    for dir in start.ancestors() {
        if is_bound::<T>(dir) {
            let value = load::<T>(dir)?;
            debug!("Found {} binding in {}", T::BINDING, dir.display());
            return Ok(Some(Bound {
                path: dir.to_path_buf(),
                value,
            }));
        }
    }
    Ok(None)
}

/// Assignment binding store
pub struct AssignmentStore;

impl AssignmentStore {
    pub fn is_bound(dir: &Path) -> bool {
        is_bound::<Assignment>(dir)
    }

    pub fn load(dir: &Path) -> Result<Assignment, StoreError> {
        load(dir)
    }

    pub fn save(dir: &Path, assignment: &Assignment) -> Result<(), StoreError> {
        save(dir, assignment)
    }
}

/// Classroom binding store
pub struct ClassroomStore;

impl ClassroomStore {
    pub fn is_bound(dir: &Path) -> bool {
        is_bound::<Classroom>(dir)
    }

    pub fn load(dir: &Path) -> Result<Classroom, StoreError> {
        load(dir)
    }

    pub fn save(dir: &Path, classroom: &Classroom) -> Result<(), StoreError> {
        save(dir, classroom)
    }
}

/// A binding together with the directory holding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound<T> {
    pub path: PathBuf,
    pub value: T,
}

/// Bindings visible from a working directory
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub classroom: Option<Bound<Classroom>>,
    pub assignment: Option<Bound<Assignment>>,
}

impl Workspace {
    /// Discover both bindings from `start` upwards
    pub fn discover(start: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            classroom: discover::<Classroom>(start)?,
            assignment: discover::<Assignment>(start)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.classroom.is_none() && self.assignment.is_none()
    }
}
