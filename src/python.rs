// Python bindings
//
// The Python class holds a snapshot of one opened file: its properties and
// the standard fields of every tag found in it.

use std::collections::BTreeMap;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::Error;
use crate::field_mapping::StandardField;
use crate::tta::{Properties, ReadStyle};

/// TTA metadata library
#[pymodule]
fn tta_tag(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<TtaFile>()?;
    Ok(())
}

fn to_py_err(error: Error) -> PyErr {
    match error {
        Error::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// An opened TTA file
#[pyclass]
pub struct TtaFile {
    #[pyo3(get)]
    path: String,
    properties: Option<Properties>,
    tags: Vec<(String, BTreeMap<&'static str, String>)>,
}

#[pymethods]
impl TtaFile {
    /// Open a file; `tags_only` skips the audio properties
    #[new]
    #[pyo3(signature = (path, tags_only = false))]
    fn new(path: String, tags_only: bool) -> PyResult<Self> {
        let style = if tags_only {
            ReadStyle::TagsOnly
        } else {
            ReadStyle::Average
        };
        let file = crate::TtaFile::open(&path, style).map_err(to_py_err)?;

        let tags = file
            .tags()
            .map(|tag| {
                let fields = StandardField::ALL
                    .into_iter()
                    .filter_map(|field| tag.get(field).map(|value| (field.as_str(), value)))
                    .collect();
                (tag.kind().name().to_string(), fields)
            })
            .collect();

        Ok(TtaFile {
            path,
            properties: file.properties().copied(),
            tags,
        })
    }

    /// Audio properties, or `None` when opened with `tags_only`
    fn properties<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyDict>>> {
        let Some(properties) = &self.properties else {
            return Ok(None);
        };

        let dict = PyDict::new(py);
        dict.set_item("description", properties.description())?;
        dict.set_item("duration", properties.duration.as_secs_f64())?;
        dict.set_item("bitrate", properties.bitrate)?;
        dict.set_item("sample_rate", properties.sample_rate)?;
        dict.set_item("channels", properties.channels)?;
        dict.set_item("bits_per_sample", properties.bits_per_sample)?;
        dict.set_item("sample_frames", properties.sample_frames)?;
        dict.set_item("version", properties.version)?;
        Ok(Some(dict))
    }

    /// Standard fields of each tag, keyed by tag kind
    fn tags<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (kind, fields) in &self.tags {
            let inner = PyDict::new(py);
            for (field, value) in fields {
                inner.set_item(*field, value)?;
            }
            dict.set_item(kind, inner)?;
        }
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        match &self.properties {
            Some(properties) => format!("TtaFile({:?}, {})", self.path, properties),
            None => format!("TtaFile({:?})", self.path),
        }
    }
}
