//! Python bindings, built with the `python` feature.

use std::path::Path;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::Config;
use crate::engine::FastSpell;
use crate::error::FastSpellError;

fn to_py_err(e: FastSpellError) -> PyErr {
    match e {
        FastSpellError::Configuration(_) => PyValueError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

/// Spellcheck-refined language identifier.
#[pyclass(name = "FastSpell", frozen)]
struct PyFastSpell {
    inner: FastSpell,
}

#[pymethods]
impl PyFastSpell {
    #[new]
    #[pyo3(signature = (config_path, lang=None, mode=None))]
    fn new(config_path: String, lang: Option<String>, mode: Option<String>) -> PyResult<Self> {
        let mut config = Config::load(Path::new(&config_path)).map_err(to_py_err)?;
        if let Some(lang) = lang {
            config.lang = lang;
        }
        if let Some(mode) = mode {
            config.mode = mode.parse().map_err(to_py_err)?;
        }
        let inner = FastSpell::from_config(&config).map_err(to_py_err)?;
        Ok(PyFastSpell { inner })
    }

    /// Language of `sentence`, or "unk"
    fn get_lang(&self, py: Python<'_>, sentence: String) -> PyResult<String> {
        py.detach(|| self.inner.classify(&sentence))
            .map_err(to_py_err)
    }

    /// Languages of many sentences, evaluated in parallel
    fn get_langs(&self, py: Python<'_>, sentences: Vec<String>) -> PyResult<Vec<String>> {
        py.detach(|| self.inner.classify_batch(sentences.as_slice()))
            .into_iter()
            .map(|r| r.map_err(to_py_err))
            .collect()
    }

    #[getter]
    fn lang(&self) -> String {
        self.inner.lang().to_string()
    }
}

/// Tokens that would be spellchecked for `sentence` under `lang`'s policy
#[pyfunction]
fn filter_tokens(sentence: String, lang: String) -> PyResult<Vec<String>> {
    Ok(crate::tokenize::filter_tokens(&sentence, &lang))
}

#[pymodule]
fn fastspell(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(filter_tokens, m)?)?;
    m.add_class::<PyFastSpell>()?;
    Ok(())
}
